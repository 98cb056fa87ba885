use async_trait::async_trait;

use super::{SearchResult, VectorStoreError};
use crate::domain::{Chunk, Embedding};

/// Persistent nearest-neighbor index over chunk embeddings.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Discard all indexed chunks, in memory and on disk. The store is
    /// rebuilt from scratch at every startup.
    async fn rebuild(&self) -> Result<(), VectorStoreError>;

    async fn upsert(
        &self,
        chunks: &[Chunk],
        embeddings: &[Embedding],
    ) -> Result<(), VectorStoreError>;

    async fn search(
        &self,
        embedding: &Embedding,
        top_k: usize,
    ) -> Result<Vec<SearchResult>, VectorStoreError>;
}
