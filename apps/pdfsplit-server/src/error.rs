//! Error types for the pdfsplit server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pdfsplit_core::SplitError;
use serde::Serialize;
use thiserror::Error;

/// Server error types
#[derive(Error, Debug)]
pub enum ServerError {
    #[error(transparent)]
    Split(#[from] SplitError),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Split timed out after {0}ms")]
    Timeout(u64),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
    code: String,
}

impl ServerError {
    /// Status and stable machine-readable code for this error
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ServerError::Split(SplitError::MalformedExpression(_)) => {
                (StatusCode::BAD_REQUEST, "MALFORMED_EXPRESSION")
            }
            ServerError::Split(SplitError::OutOfRange { .. }) => {
                (StatusCode::BAD_REQUEST, "PAGE_OUT_OF_RANGE")
            }
            ServerError::Split(SplitError::InvalidSplitValue(_)) => {
                (StatusCode::BAD_REQUEST, "INVALID_SPLIT_VALUE")
            }
            ServerError::Split(SplitError::CorruptSource(_)) => {
                (StatusCode::BAD_REQUEST, "CORRUPT_SOURCE")
            }
            ServerError::Split(SplitError::SerializationFailed(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "SERIALIZATION_FAILED")
            }
            ServerError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "INVALID_REQUEST"),
            ServerError::Timeout(_) => (StatusCode::REQUEST_TIMEOUT, "TIMEOUT"),
            ServerError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let body = ErrorResponse {
            success: false,
            error: self.to_string(),
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
