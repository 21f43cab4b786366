use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use pizzeria_store::StoreError;
use tracing::error;

use crate::models::{ApiErrorResponse, ApiErrorsResponse};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Internal server error: {0}")]
    InternalError(String),
    /// Restaurant pizza validation failure, reported as an `errors` list.
    #[error("Invalid entry: {0}")]
    InvalidEntry(String),
    /// Restaurant pizza persistence failure, reported as an `errors` list.
    #[error("Entry rejected")]
    EntryRejected,
}

impl ApiError {
    /// Maps a missing row to 404 with `not_found` as the message and
    /// anything else to 500.
    pub fn from_store(err: StoreError, not_found: &str) -> Self {
        match err {
            StoreError::NotFound => ApiError::NotFound(not_found.to_string()),
            err => err.into(),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        error!(error = %err, "store operation failed");
        ApiError::InternalError(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(msg) => single(StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => single(StatusCode::NOT_FOUND, msg),
            ApiError::InternalError(msg) => single(StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::InvalidEntry(msg) => listed(StatusCode::BAD_REQUEST, msg),
            ApiError::EntryRejected => listed(
                StatusCode::INTERNAL_SERVER_ERROR,
                "An error occurred.".to_string(),
            ),
        }
    }
}

fn single(status: StatusCode, error: String) -> Response {
    (status, Json(ApiErrorResponse { error })).into_response()
}

fn listed(status: StatusCode, error: String) -> Response {
    (status, Json(ApiErrorsResponse { errors: vec![error] })).into_response()
}
