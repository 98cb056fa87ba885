use async_trait::async_trait;

use crate::domain::{Document, Page};

/// Extracts the text pages of a source document from its raw bytes.
#[async_trait]
pub trait FileLoader: Send + Sync {
    async fn extract_pages(
        &self,
        data: &[u8],
        document: &Document,
    ) -> Result<Vec<Page>, FileLoaderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum FileLoaderError {
    #[error("extraction failed: {0}")]
    ExtractionFailed(String),
    #[error("no extractable text in {0}")]
    NoTextFound(String),
}
