use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use tracing::warn;

use crate::error::CovidError;

/// Error type that renders as a JSON `{"error": "..."}` response with an
/// appropriate HTTP status code.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.into(),
        }
    }

    pub fn bad_gateway(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_GATEWAY,
            message: msg.into(),
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            warn!(status = %self.status, message = %self.message, "request failed");
        }
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

impl From<CovidError> for AppError {
    fn from(e: CovidError) -> Self {
        match &e {
            CovidError::Http(_) | CovidError::Upstream { .. } | CovidError::Csv(_) => {
                AppError::bad_gateway(e.to_string())
            }
            CovidError::InvalidArgument(msg) => AppError::bad_request(msg.clone()),
            _ => AppError::internal(e.to_string()),
        }
    }
}
