mod chunker;
mod extractor;
mod workspace;

pub mod extractors;

pub use chunker::{WordChunker, DEFAULT_MAX_CHUNK_SIZE};
pub use extractor::DocumentExtractor;
pub use workspace::TempWorkspace;
