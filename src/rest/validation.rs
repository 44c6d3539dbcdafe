use serde_json::Value;
use thiserror::Error;

use super::models::SurveyQuery;

/// Rejections raised before the store is touched. Always a 400.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SurveyRequestError {
    #[error("Malformed request, missing surveyName request parameter.")]
    MissingSurveyName,
    #[error("Malformed request, missing content in request body.")]
    MissingContent,
}

pub fn require_survey_name(query: Option<SurveyQuery>) -> Result<String, SurveyRequestError> {
    query
        .and_then(|q| q.survey_name)
        .filter(|name| !name.is_empty())
        .ok_or(SurveyRequestError::MissingSurveyName)
}

/// Parses a request body into survey content. Absent, unparseable and
/// empty documents are all reported as missing content.
pub fn parse_content(body: &[u8]) -> Result<Value, SurveyRequestError> {
    let content: Value =
        serde_json::from_slice(body).map_err(|_| SurveyRequestError::MissingContent)?;
    if is_empty_content(&content) {
        return Err(SurveyRequestError::MissingContent);
    }
    Ok(content)
}

fn is_empty_content(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    }
}
