use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::models::DocumentFormat;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Error, Debug)]
pub enum DocsortError {
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("{format} extraction failed: {source}")]
    ExtractionFailed {
        format: DocumentFormat,
        #[source]
        source: BoxError,
    },

    #[error("Failed to unpack archive: {0}")]
    ArchiveUnpackFailed(#[from] zip::result::ZipError),

    #[error("Failed to parse slide part {part}: {message}")]
    PartialSlideParse { part: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Classification error: {0}")]
    Classification(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DocsortError {
    pub fn extraction(format: DocumentFormat, source: impl Into<BoxError>) -> Self {
        DocsortError::ExtractionFailed {
            format,
            source: source.into(),
        }
    }

    /// Whether processing of the surrounding document may continue.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, DocsortError::PartialSlideParse { .. })
    }
}

impl IntoResponse for DocsortError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            DocsortError::UnsupportedFormat(_) => {
                (StatusCode::UNSUPPORTED_MEDIA_TYPE, self.to_string())
            }
            DocsortError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            DocsortError::ExtractionFailed { .. }
            | DocsortError::ArchiveUnpackFailed(_)
            | DocsortError::PartialSlideParse { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
            DocsortError::Io(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            DocsortError::Classification(msg) => (StatusCode::BAD_GATEWAY, msg.clone()),
            DocsortError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = Json(json!({
            "error": message,
            "code": status.as_u16()
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, DocsortError>;
