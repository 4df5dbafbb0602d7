use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::DocumentFormat;
use crate::error::Result;

/// Where a document's bytes come from.
#[derive(Debug, Clone)]
pub enum DocumentSource {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

/// A document queued for extraction. Created per request, read once.
#[derive(Debug, Clone)]
pub struct Document {
    source: DocumentSource,
    format: DocumentFormat,
}

impl Document {
    pub fn from_path(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let format = DocumentFormat::from_path(&path)?;
        Ok(Self {
            source: DocumentSource::Path(path),
            format,
        })
    }

    pub fn from_bytes(bytes: Vec<u8>, format: DocumentFormat) -> Self {
        Self {
            source: DocumentSource::Bytes(bytes),
            format,
        }
    }

    pub fn format(&self) -> DocumentFormat {
        self.format
    }

    pub fn source(&self) -> &DocumentSource {
        &self.source
    }

    pub fn path(&self) -> Option<&Path> {
        match &self.source {
            DocumentSource::Path(path) => Some(path),
            DocumentSource::Bytes(_) => None,
        }
    }

    /// File name used in log lines.
    pub fn display_name(&self) -> String {
        match &self.source {
            DocumentSource::Path(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            DocumentSource::Bytes(_) => format!("<memory>.{}", self.format),
        }
    }

    pub async fn read_bytes(&self) -> Result<Vec<u8>> {
        match &self.source {
            DocumentSource::Path(path) => Ok(tokio::fs::read(path).await?),
            DocumentSource::Bytes(bytes) => Ok(bytes.clone()),
        }
    }

    pub(crate) fn into_source(self) -> DocumentSource {
        self.source
    }
}

/// Chunked text of one document, as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    pub chunks: Vec<String>,
    pub total_chunks: usize,
    pub file_type: DocumentFormat,
}

impl ExtractionResult {
    pub fn new(chunks: Vec<String>, file_type: DocumentFormat) -> Self {
        Self {
            total_chunks: chunks.len(),
            chunks,
            file_type,
        }
    }

    /// All chunks joined with single spaces, the form submitted for classification.
    pub fn joined_text(&self) -> String {
        self.chunks.join(" ")
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}
