//! Error handling

use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
    Json,
};
use serde_json::json;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Bad request payload (empty batch, missing columns)
    #[error("{0}")]
    Validation(String),

    /// Model could not score the batch
    #[error("Inference error: {0}")]
    Inference(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Inference(msg) => {
                tracing::error!("Inference failed: {}", msg);
                StatusCode::BAD_REQUEST
            }
        };

        let body = Json(json!({ "detail": self.to_string() }));

        (status, body).into_response()
    }
}
