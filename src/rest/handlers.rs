use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::storage::{Storage, StoreError, SurveyRead, SurveyWrite};

use super::{
    models::{EmptyResponse, ErrorResponse, HealthResponse, SurveyNamesResponse, SurveyQuery},
    validation::{parse_content, require_survey_name, SurveyRequestError},
    AppState,
};

pub async fn health<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
) -> impl IntoResponse {
    let uptime_secs = state.started_at.elapsed().map(|d| d.as_secs()).unwrap_or(0);
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".to_string(),
            uptime_secs,
        }),
    )
}

pub async fn list_surveys<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
) -> impl IntoResponse {
    match state
        .storage
        .get_client()
        .and_then(|handle| handle.list_surveys())
    {
        Ok(survey_names) => {
            log::info!("GET surveys: {} survey(s)", survey_names.len());
            Json(SurveyNamesResponse { survey_names }).into_response()
        }
        Err(err) => {
            log::error!("GET surveys error: {}", err);
            store_failure(err)
        }
    }
}

pub async fn get_survey<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    query: Result<Query<SurveyQuery>, QueryRejection>,
) -> impl IntoResponse {
    let name = match require_survey_name(query.ok().map(|Query(q)| q)) {
        Ok(name) => name,
        Err(err) => {
            log::error!("GET survey rejected: {}", err);
            return bad_request(err);
        }
    };

    match state
        .storage
        .get_client()
        .and_then(|handle| handle.get_survey(&name))
    {
        Ok(Some(survey)) => {
            log::info!("GET survey {:?}: found", name);
            Json(survey.content).into_response()
        }
        Ok(None) => {
            log::info!("GET survey {:?}: not found", name);
            (StatusCode::NOT_FOUND, Json(EmptyResponse::default())).into_response()
        }
        Err(err) => {
            log::error!("GET survey {:?} error: {}", name, err);
            store_failure(err)
        }
    }
}

pub async fn put_survey<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    query: Result<Query<SurveyQuery>, QueryRejection>,
    body: Result<Bytes, BytesRejection>,
) -> impl IntoResponse {
    let name = match require_survey_name(query.ok().map(|Query(q)| q)) {
        Ok(name) => name,
        Err(err) => {
            log::error!("PUT survey rejected: {}", err);
            return bad_request(err);
        }
    };
    let body = match body {
        Ok(body) => body,
        Err(rejection) => {
            log::error!("PUT survey {:?} rejected: {}", name, rejection.body_text());
            return error_response(rejection.status(), rejection.body_text());
        }
    };
    let content = match parse_content(&body) {
        Ok(content) => content,
        Err(err) => {
            log::error!("PUT survey {:?} rejected: {}", name, err);
            return bad_request(err);
        }
    };

    match state
        .storage
        .get_client()
        .and_then(|handle| handle.put_survey(&name, &content))
    {
        Ok(()) => {
            log::info!("PUT survey {:?}: stored", name);
            Json(EmptyResponse::default()).into_response()
        }
        Err(err) => {
            log::error!("PUT survey {:?} error: {}", name, err);
            store_failure(err)
        }
    }
}

pub async fn not_found() -> impl IntoResponse {
    error_response(StatusCode::NOT_FOUND, "endpoint not found")
}

pub async fn method_not_allowed() -> impl IntoResponse {
    error_response(StatusCode::METHOD_NOT_ALLOWED, "method not allowed")
}

fn bad_request(err: SurveyRequestError) -> Response {
    error_response(StatusCode::BAD_REQUEST, err.to_string())
}

fn store_failure(err: StoreError) -> Response {
    error_response(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
}

fn error_response(status: StatusCode, error: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
        }),
    )
        .into_response()
}
