use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_secs: u64,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SurveyNamesResponse {
    pub survey_names: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
}

/// Serializes as `{}`. Used for the 404 and successful PUT bodies.
#[derive(Serialize, Deserialize, Debug, Default, PartialEq)]
pub struct EmptyResponse {}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct SurveyQuery {
    pub survey_name: Option<String>,
}
