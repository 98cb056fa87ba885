use async_trait::async_trait;

use crate::domain::{Chunk, Page};

#[async_trait]
pub trait TextSplitter: Send + Sync {
    async fn split(&self, page: &Page) -> Result<Vec<Chunk>, TextSplitterError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TextSplitterError {
    #[error("splitting failed: {0}")]
    SplittingFailed(String),
}
