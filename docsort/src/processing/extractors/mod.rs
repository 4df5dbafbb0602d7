//! One extractor per supported format. Each turns a document's bytes into a
//! single raw text blob; chunking happens afterwards in the dispatcher.

pub mod docx;
pub mod pdf;
pub mod pptx;
pub mod text;
pub mod xlsx;

pub use docx::DocxExtractor;
pub use pdf::PdfExtractor;
pub use pptx::PptxExtractor;
pub use text::TextExtractor;
pub use xlsx::XlsxExtractor;
