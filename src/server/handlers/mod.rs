/// Health and readiness probe handlers.
pub mod health;
/// Prometheus metrics exposition handler.
pub mod metrics;
/// Corpus search handler.
pub mod search;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::error::LemmataError;

/// Wrapper that converts `LemmataError` into an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub LemmataError);

impl From<LemmataError> for ApiError {
    fn from(e: LemmataError) -> Self {
        ApiError(e)
    }
}

/// Renders `{"error": <message>}` with the error's status code.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.0.status_code();
        let status_code = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status_code.is_server_error() {
            tracing::error!(error = %self.0, status, "server error");
        } else if status_code.is_client_error() {
            tracing::warn!(error = %self.0, status, "client error");
        }
        let body = json!({ "error": self.0.to_string() });
        (status_code, axum::Json(body)).into_response()
    }
}
