//! Mapping from domain errors to HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

use domains::error::DomainError;

#[derive(Debug)]
pub enum ApiError {
    Domain(DomainError),
    /// The request carried no usable identity.
    Unauthenticated(&'static str),
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Unauthenticated(reason) => (StatusCode::UNAUTHORIZED, reason.to_string()),
            // Validation and authorization messages are written for end
            // users; they go out bare, without the display prefix.
            ApiError::Domain(err) => match err {
                DomainError::NotFound(..) => (StatusCode::NOT_FOUND, err.to_string()),
                DomainError::Validation(message) => (StatusCode::UNPROCESSABLE_ENTITY, message),
                DomainError::Unauthorized(message) => (StatusCode::FORBIDDEN, message),
                DomainError::Internal(_) => {
                    // Logged here; the response body stays generic.
                    error!(error = %err, "request failed");
                    (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string())
                }
            },
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}
