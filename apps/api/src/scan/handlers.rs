//! Axum route handlers for the Scan API.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::DocumentKind;
use crate::scan::pipeline::{ScanRequest, ScanResponse, UploadedResume};
use crate::state::AppState;

pub const RESUME_FIELD: &str = "resume";
pub const JOB_DESCRIPTION_FIELD: &str = "jobDescription";
/// Set by the upstream auth layer; scans without it are stored unowned.
pub const OWNER_HEADER: &str = "x-user-id";

#[derive(Debug, Serialize)]
pub struct MatchResponse {
    pub success: bool,
    pub data: ScanResponse,
}

/// POST /api/scan/match
///
/// Multipart form: `resume` (file: .txt, .pdf or .docx) and `jobDescription` (text).
/// Returns skill match, score, structured sections and the ATS rewrite.
pub async fn handle_match(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Json<MatchResponse>, AppError> {
    let owner_id = owner_from_headers(&headers)?;

    let mut upload: Option<UploadedResume> = None;
    let mut job_description: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(malformed)? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some(RESUME_FIELD) => {
                let mime = field.content_type().map(str::to_owned);
                let file_name = field.file_name().map(str::to_owned);
                let data: Bytes = field.bytes().await.map_err(malformed)?;
                if data.is_empty() && file_name.as_deref().map_or(true, str::is_empty) {
                    // browsers send an empty part when no file was picked
                    continue;
                }
                let kind = DocumentKind::resolve(mime.as_deref(), file_name.as_deref())?;
                info!(
                    "Received resume upload: {} bytes, {:?}",
                    data.len(),
                    kind
                );
                upload = Some(
                    UploadedResume::spool(&data, kind)
                        .await
                        .map_err(|e| AppError::Internal(e.into()))?,
                );
            }
            Some(JOB_DESCRIPTION_FIELD) => {
                job_description = Some(field.text().await.map_err(malformed)?);
            }
            _ => {}
        }
    }

    let data = state
        .scanner
        .scan(ScanRequest {
            upload,
            job_description,
            owner_id,
        })
        .await?;

    Ok(Json(MatchResponse {
        success: true,
        data,
    }))
}

fn owner_from_headers(headers: &HeaderMap) -> Result<Option<Uuid>, AppError> {
    headers
        .get(OWNER_HEADER)
        .map(|value| {
            value
                .to_str()
                .ok()
                .and_then(|s| Uuid::parse_str(s.trim()).ok())
                .ok_or_else(|| AppError::RejectedInput(format!("{OWNER_HEADER} must be a UUID")))
        })
        .transpose()
}

fn malformed(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge("Uploaded resume is too large".to_string())
    } else {
        AppError::RejectedInput(format!("Malformed multipart body: {}", err.body_text()))
    }
}
