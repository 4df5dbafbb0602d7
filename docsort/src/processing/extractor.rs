use std::io::Cursor;
use std::path::{Path, PathBuf};

use crate::config::ProcessingConfig;
use crate::error::{DocsortError, Result};
use crate::models::{Document, DocumentFormat, DocumentSource, ExtractionResult};
use crate::processing::extractors::{
    DocxExtractor, PdfExtractor, PptxExtractor, TextExtractor, XlsxExtractor,
};
use crate::processing::WordChunker;

const PREVIEW_CHARS: usize = 200;

/// Routes a document to the extractor for its format and chunks the result.
#[derive(Debug, Clone)]
pub struct DocumentExtractor {
    chunker: WordChunker,
    temp_dir: PathBuf,
    max_unpacked_bytes: u64,
}

impl DocumentExtractor {
    pub fn new(config: &ProcessingConfig) -> Self {
        Self {
            chunker: WordChunker::from_config(config),
            temp_dir: config.temp_dir.clone(),
            max_unpacked_bytes: config.max_unpacked_bytes,
        }
    }

    pub fn chunker(&self) -> &WordChunker {
        &self.chunker
    }

    pub fn temp_dir(&self) -> &Path {
        &self.temp_dir
    }

    /// Extracts and chunks the file at `path`. The format comes from the
    /// extension alone; unsupported extensions fail before the file is read.
    pub async fn extract(&self, path: impl AsRef<Path>) -> Result<ExtractionResult> {
        let document = Document::from_path(path.as_ref())?;
        self.extract_document(document).await
    }

    pub async fn extract_document(&self, document: Document) -> Result<ExtractionResult> {
        let format = document.format();
        let name = document.display_name();

        let text = self.extract_text(document).await?;

        tracing::info!(
            file_name = %name,
            file_type = %format,
            text_length = text.chars().count(),
            preview = %preview(&text),
            "Extracted text"
        );

        let chunks = self.chunker.chunk(&text);
        Ok(ExtractionResult::new(chunks, format))
    }

    /// Raw, unchunked text of a document.
    pub async fn extract_text(&self, document: Document) -> Result<String> {
        let format = document.format();

        match format {
            DocumentFormat::Txt => TextExtractor::extract(document.read_bytes().await?),
            DocumentFormat::Pdf => {
                let bytes = document.read_bytes().await?;
                run_blocking(move || PdfExtractor::extract(&bytes)).await
            }
            DocumentFormat::Docx => {
                let bytes = document.read_bytes().await?;
                run_blocking(move || DocxExtractor::extract(&bytes)).await
            }
            DocumentFormat::Xlsx => {
                let bytes = document.read_bytes().await?;
                run_blocking(move || XlsxExtractor::extract(&bytes)).await
            }
            DocumentFormat::Pptx => {
                let pptx = PptxExtractor::new(self.temp_dir.clone())
                    .with_max_unpacked_bytes(self.max_unpacked_bytes);
                // The blocking task keeps running if this future is dropped,
                // so its workspace is still removed.
                run_blocking(move || match document.into_source() {
                    DocumentSource::Path(path) => pptx.extract_file(&path),
                    DocumentSource::Bytes(bytes) => pptx.extract(Cursor::new(bytes)),
                })
                .await
            }
        }
    }
}

impl Default for DocumentExtractor {
    fn default() -> Self {
        Self::new(&ProcessingConfig::default())
    }
}

async fn run_blocking<F>(f: F) -> Result<String>
where
    F: FnOnce() -> Result<String> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| DocsortError::Internal(format!("Extraction task failed: {e}")))?
}

fn preview(text: &str) -> String {
    text.chars().take(PREVIEW_CHARS).collect()
}
