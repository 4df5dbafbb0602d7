use crate::config::ProcessingConfig;

/// Default chunk bound, in characters.
pub const DEFAULT_MAX_CHUNK_SIZE: usize = 15_000;

/// Greedy word-aligned chunker.
///
/// Text is split on whitespace and words are packed into chunks joined by a
/// single space, so a chunk's length counts its separators too. A chunk never
/// exceeds `max_chunk_size` characters unless it holds a single word that is
/// itself longer than the bound: words are never split.
#[derive(Debug, Clone)]
pub struct WordChunker {
    max_chunk_size: usize,
}

impl WordChunker {
    pub fn new(max_chunk_size: usize) -> Self {
        Self { max_chunk_size }
    }

    pub fn from_config(config: &ProcessingConfig) -> Self {
        Self::new(config.max_chunk_size)
    }

    pub fn max_chunk_size(&self) -> usize {
        self.max_chunk_size
    }

    pub fn chunk(&self, text: &str) -> Vec<String> {
        let mut chunks = Vec::new();
        let mut current = String::new();
        let mut current_len = 0usize;

        for word in text.split_whitespace() {
            let word_len = word.chars().count();

            if current.is_empty() {
                current.push_str(word);
                current_len = word_len;
                continue;
            }

            if current_len + 1 + word_len > self.max_chunk_size {
                chunks.push(std::mem::take(&mut current));
                current.push_str(word);
                current_len = word_len;
            } else {
                current.push(' ');
                current.push_str(word);
                current_len += 1 + word_len;
            }
        }

        if !current.is_empty() {
            chunks.push(current);
        }

        chunks
    }
}

impl Default for WordChunker {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CHUNK_SIZE)
    }
}
