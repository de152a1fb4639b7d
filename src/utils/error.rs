use crate::api::metrics;
use crate::database::StoreError;
use crate::services::GenerationError;
use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

/// Erro exposto pela API HTTP; o corpo é sempre `{ "error": message }`
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error("Database error: {0}")]
    Database(#[from] StoreError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Generation(GenerationError::InvalidRequest(_)) | AppError::InvalidRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Generation(_) | AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Every error response counts towards `http_errors_total`.
    fn error_response(&self) -> HttpResponse {
        metrics::increment_error_count();
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": self.to_string()
        }))
    }
}
