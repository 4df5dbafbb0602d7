use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{DocsortError, Result};

/// Format tag derived from a file's extension.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Xlsx,
    Pptx,
    Txt,
}

impl DocumentFormat {
    pub const ALL: [DocumentFormat; 5] = [
        DocumentFormat::Pdf,
        DocumentFormat::Docx,
        DocumentFormat::Xlsx,
        DocumentFormat::Pptx,
        DocumentFormat::Txt,
    ];

    /// Case-insensitive lookup of a bare extension (no leading dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            "xlsx" => Some(Self::Xlsx),
            "pptx" => Some(Self::Pptx),
            "txt" => Some(Self::Txt),
            _ => None,
        }
    }

    /// Resolves the format from the path's extension only. The file is never
    /// opened, so an unsupported path fails before any I/O happens.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();

        Self::from_extension(ext).ok_or_else(|| {
            if ext.is_empty() {
                DocsortError::UnsupportedFormat(format!(
                    "{} has no file extension",
                    path.display()
                ))
            } else {
                DocsortError::UnsupportedFormat(ext.to_lowercase())
            }
        })
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
            Self::Xlsx => "xlsx",
            Self::Pptx => "pptx",
            Self::Txt => "txt",
        }
    }
}

impl std::fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl std::str::FromStr for DocumentFormat {
    type Err = DocsortError;

    fn from_str(s: &str) -> Result<Self> {
        let ext = s.trim().trim_start_matches('.');
        Self::from_extension(ext).ok_or_else(|| DocsortError::UnsupportedFormat(ext.to_lowercase()))
    }
}
