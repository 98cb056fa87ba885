use async_trait::async_trait;

use crate::application::ports::{TextSplitter, TextSplitterError};
use crate::domain::{Chunk, Page};

/// Character-windowed splitter: fixed maximum chunk size with a fixed
/// overlap carried between consecutive chunks of the same page.
pub struct RecursiveCharacterSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl RecursiveCharacterSplitter {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self {
            chunk_size,
            chunk_overlap,
        }
    }
}

#[async_trait]
impl TextSplitter for RecursiveCharacterSplitter {
    async fn split(&self, page: &Page) -> Result<Vec<Chunk>, TextSplitterError> {
        if self.chunk_size == 0 {
            return Err(TextSplitterError::SplittingFailed(
                "chunk size must be non-zero".to_string(),
            ));
        }

        let chars: Vec<char> = page.text.chars().collect();
        let total_len = chars.len();

        let mut chunks = Vec::new();
        if total_len == 0 {
            return Ok(chunks);
        }

        let step = if self.chunk_size > self.chunk_overlap {
            self.chunk_size - self.chunk_overlap
        } else {
            self.chunk_size
        };

        let mut offset = 0;
        loop {
            let end = (offset + self.chunk_size).min(total_len);
            let chunk_text: String = chars[offset..end].iter().collect();

            chunks.push(Chunk::new(
                chunk_text,
                page.document_id,
                page.number,
                offset,
            ));

            if end == total_len {
                break;
            }
            offset += step;
        }

        Ok(chunks)
    }
}
