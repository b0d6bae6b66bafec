use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use winter_core::error::LoadError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),
}

impl From<LoadError> for AppError {
    fn from(e: LoadError) -> Self {
        Self::NotFound(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        };
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}
