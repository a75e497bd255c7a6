use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::domain::DomainError;

const SERVER_ERROR_MESSAGE: &str = "Server error occurred";

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Outermost error boundary.
///
/// Validation failures are echoed to the caller; everything else is logged and
/// replaced by an opaque message so upstream details never leak.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Domain(DomainError),
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            Self::Domain(DomainError::Validation(message)) => (StatusCode::BAD_REQUEST, message),
            Self::Domain(err) => {
                tracing::error!(error = %err, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    SERVER_ERROR_MESSAGE.to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
