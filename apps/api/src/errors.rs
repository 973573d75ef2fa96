use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::extraction::ExtractionError;
use crate::llm_client::LlmError;
use crate::storage::StorageError;

const UNREADABLE_MESSAGE: &str =
    "Unable to read resume content. Please upload a text-based resume.";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// The first three variants are caller-fixable and are raised before any model call.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    RejectedInput(String),

    #[error("{0}")]
    UnsupportedFileType(String),

    #[error("{0}")]
    UnreadableResume(String),

    #[error("Skill extraction failed: {0}")]
    ExtractionService(#[from] LlmError),

    #[error("Resume upload failed: {0}")]
    UploadFailed(#[from] StorageError),

    #[error("{0}")]
    PayloadTooLarge(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::RejectedInput(msg) => {
                (StatusCode::BAD_REQUEST, "REJECTED_INPUT", msg.clone())
            }
            AppError::UnsupportedFileType(msg) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "UNSUPPORTED_FILE_TYPE",
                msg.clone(),
            ),
            AppError::UnreadableResume(msg) => {
                (StatusCode::BAD_REQUEST, "UNREADABLE_RESUME", msg.clone())
            }
            AppError::ExtractionService(e) => {
                tracing::error!("Skill extraction error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "EXTRACTION_SERVICE_ERROR",
                    "The skill extraction service returned no content".to_string(),
                )
            }
            AppError::UploadFailed(e) => {
                tracing::error!("Upload error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "UPLOAD_FAILED",
                    "File upload failed".to_string(),
                )
            }
            AppError::PayloadTooLarge(msg) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "PAYLOAD_TOO_LARGE",
                msg.clone(),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "success": false,
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

impl From<ExtractionError> for AppError {
    fn from(err: ExtractionError) -> Self {
        match err {
            ExtractionError::UnsupportedFileType(mime) => AppError::UnsupportedFileType(format!(
                "Unsupported resume file type '{mime}'. Upload a .txt, .pdf or .docx file."
            )),
            ExtractionError::Pdf(detail) | ExtractionError::Docx(detail) => {
                tracing::warn!("Resume could not be parsed: {detail}");
                AppError::UnreadableResume(UNREADABLE_MESSAGE.to_string())
            }
            other => AppError::Internal(other.into()),
        }
    }
}

impl AppError {
    /// Extraction succeeded but produced nothing usable.
    pub fn unreadable_resume() -> Self {
        AppError::UnreadableResume(UNREADABLE_MESSAGE.to_string())
    }
}
