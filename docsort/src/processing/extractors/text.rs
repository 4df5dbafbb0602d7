use crate::error::{DocsortError, Result};
use crate::models::DocumentFormat;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Plain text passes through unchanged apart from a leading byte-order mark.
pub struct TextExtractor;

impl TextExtractor {
    pub fn extract(bytes: Vec<u8>) -> Result<String> {
        let bytes = match bytes.strip_prefix(UTF8_BOM) {
            Some(stripped) => stripped.to_vec(),
            None => bytes,
        };

        String::from_utf8(bytes).map_err(|e| DocsortError::extraction(DocumentFormat::Txt, e))
    }
}
