use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::services::generator::GeneratorError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    InvalidJson(#[from] JsonRejection),

    #[error("Message too long: {len} bytes (limit {limit})")]
    MessageTooLong { len: usize, limit: usize },

    #[error("Generation failed: {0}")]
    Generation(#[from] GeneratorError),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::InvalidJson(rejection) => rejection.status(),
            AppError::MessageTooLong { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Generation(_) => StatusCode::BAD_GATEWAY,
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, "request rejected");
        }

        let error = match &self {
            AppError::InvalidJson(rejection) => rejection.body_text(),
            other => other.to_string(),
        };

        (status, Json(ErrorResponse { error })).into_response()
    }
}
