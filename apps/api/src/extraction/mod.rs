//! Text Extractor — turns an uploaded resume document into plain text.
//!
//! Supported: plain text, PDF, and Word (OOXML) documents. Anything else is
//! rejected with `UnsupportedFileType` before a scan starts. Blank output is NOT
//! an error here; the pipeline decides whether extracted text is usable.

mod docx;

use std::path::Path;

use thiserror::Error;
use tokio::task::JoinError;

pub const MIME_TEXT: &str = "text/plain";
pub const MIME_PDF: &str = "application/pdf";
pub const MIME_DOCX: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported resume file type: {0}")]
    UnsupportedFileType(String),

    #[error("Failed to read uploaded file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse PDF: {0}")]
    Pdf(String),

    #[error("Failed to parse Word document: {0}")]
    Docx(String),

    #[error("Extraction task failed: {0}")]
    Join(tokio::task::JoinError),
}

/// The document formats the extractor understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    PlainText,
    Pdf,
    Docx,
}

impl DocumentKind {
    /// Maps an exact MIME type (parameters such as `; charset=utf-8` are ignored).
    pub fn from_mime(mime: &str) -> Result<Self, ExtractionError> {
        let essence = mime.split(';').next().unwrap_or_default().trim();
        match essence.to_ascii_lowercase().as_str() {
            MIME_TEXT => Ok(Self::PlainText),
            MIME_PDF => Ok(Self::Pdf),
            MIME_DOCX => Ok(Self::Docx),
            _ => Err(ExtractionError::UnsupportedFileType(mime.to_string())),
        }
    }

    /// Infers the kind from a file name's extension.
    pub fn from_file_name(name: &str) -> Option<Self> {
        let ext = Path::new(name).extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "txt" => Some(Self::PlainText),
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            _ => None,
        }
    }

    /// Resolves the kind of an upload: a supported declared MIME type wins,
    /// otherwise the file extension decides.
    pub fn resolve(mime: Option<&str>, file_name: Option<&str>) -> Result<Self, ExtractionError> {
        if let Some(kind) = mime.and_then(|m| Self::from_mime(m).ok()) {
            return Ok(kind);
        }
        file_name.and_then(Self::from_file_name).ok_or_else(|| {
            ExtractionError::UnsupportedFileType(
                mime.or(file_name).unwrap_or("unknown").to_string(),
            )
        })
    }

    pub fn mime(&self) -> &'static str {
        match self {
            Self::PlainText => MIME_TEXT,
            Self::Pdf => MIME_PDF,
            Self::Docx => MIME_DOCX,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::PlainText => "txt",
            Self::Pdf => "pdf",
            Self::Docx => "docx",
        }
    }
}

/// Reads the file at `path` and extracts its text. The file is left in place.
pub async fn extract_text_from_path(
    path: &Path,
    kind: DocumentKind,
) -> Result<String, ExtractionError> {
    let bytes = tokio::fs::read(path).await?;
    extract_text(bytes, kind).await
}

/// Extracts text from in-memory document bytes.
/// PDF and DOCX parsing are CPU-bound and run on the blocking pool.
pub async fn extract_text(bytes: Vec<u8>, kind: DocumentKind) -> Result<String, ExtractionError> {
    match kind {
        DocumentKind::PlainText => Ok(String::from_utf8_lossy(&bytes).into_owned()),
        DocumentKind::Pdf => tokio::task::spawn_blocking(move || {
            pdf_extract::extract_text_from_mem(&bytes)
                .map_err(|e| ExtractionError::Pdf(e.to_string()))
        })
        .await
        .map_err(|e| parser_failure(e, ExtractionError::Pdf))?,
        DocumentKind::Docx => tokio::task::spawn_blocking(move || docx::extract_raw_text(&bytes))
            .await
            .map_err(|e| parser_failure(e, ExtractionError::Docx))?,
    }
}

/// A parser that panics on a malformed document reports it as unparseable.
/// Only cancellation is left as a task failure.
fn parser_failure(err: JoinError, unparseable: fn(String) -> ExtractionError) -> ExtractionError {
    if err.is_panic() {
        unparseable("parser panicked on malformed document".to_string())
    } else {
        ExtractionError::Join(err)
    }
}
