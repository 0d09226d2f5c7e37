//! JSON error bodies for the HTTP layer.

use crate::utils::error::{DirectoryError, ErrorCategory};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;

/// Error returned by handlers, rendered as `{ "error": message }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// Maps a service error to a response. Anything other than a validation or
    /// not-found error is logged and replaced by the endpoint's generic message.
    pub fn from_service(err: DirectoryError, context: &str) -> Self {
        match err.category() {
            ErrorCategory::Validation => Self::bad_request(err.user_friendly_message()),
            ErrorCategory::NotFound => Self::not_found(err.user_friendly_message()),
            _ => {
                tracing::error!(error = %err, "{}", context);
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, context)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}
