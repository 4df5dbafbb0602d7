use crate::error::{DocsortError, Result};
use crate::models::DocumentFormat;

pub struct PdfExtractor;

impl PdfExtractor {
    pub fn extract(bytes: &[u8]) -> Result<String> {
        pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| DocsortError::extraction(DocumentFormat::Pdf, e))
    }
}
