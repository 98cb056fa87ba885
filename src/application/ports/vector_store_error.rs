#[derive(Debug, thiserror::Error)]
pub enum VectorStoreError {
    #[error("persistence failed: {0}")]
    PersistenceFailed(String),
    #[error("upsert failed: {0}")]
    UpsertFailed(String),
    #[error("search failed: {0}")]
    SearchFailed(String),
}
