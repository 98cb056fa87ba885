use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::application::ports::{SearchResult, VectorStore, VectorStoreError};
use crate::domain::{Chunk, ChunkId, DocumentId, Embedding};

const INDEX_FILE: &str = "index.json";
const FORMAT_VERSION: u32 = 1;

/// File-backed vector store: the full index lives in memory and is
/// serialized as one JSON file under the index directory on every upsert.
/// Search is exhaustive cosine similarity over all entries.
///
/// The file records the embedding model and a format version; state
/// written by a different model or format is discarded on open.
pub struct DiskVectorStore {
    index_dir: PathBuf,
    model: String,
    entries: RwLock<Vec<IndexEntry>>,
}

struct IndexEntry {
    chunk: Chunk,
    embedding: Embedding,
}

#[derive(Serialize, Deserialize)]
struct PersistedIndex {
    version: u32,
    model: String,
    entries: Vec<PersistedEntry>,
}

#[derive(Serialize, Deserialize)]
struct PersistedEntry {
    chunk_id: String,
    document_id: String,
    page: u32,
    offset: usize,
    text: String,
    embedding: Vec<f32>,
}

impl DiskVectorStore {
    pub async fn open(index_dir: &Path, model: String) -> Result<Self, VectorStoreError> {
        let index_dir = index_dir.to_path_buf();
        tokio::fs::create_dir_all(&index_dir)
            .await
            .map_err(|e| VectorStoreError::PersistenceFailed(e.to_string()))?;

        let store = Self {
            index_dir,
            model,
            entries: RwLock::new(Vec::new()),
        };
        store.load().await?;
        Ok(store)
    }

    fn index_path(&self) -> PathBuf {
        self.index_dir.join(INDEX_FILE)
    }

    async fn load(&self) -> Result<(), VectorStoreError> {
        let path = self.index_path();
        let data = match tokio::fs::read_to_string(&path).await {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(VectorStoreError::PersistenceFailed(e.to_string())),
        };

        let persisted: PersistedIndex = match serde_json::from_str(&data) {
            Ok(persisted) => persisted,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "discarding unreadable index");
                return Ok(());
            }
        };

        if persisted.version != FORMAT_VERSION || persisted.model != self.model {
            warn!(
                version = persisted.version,
                model = %persisted.model,
                "discarding index with stale format or embedding model"
            );
            return Ok(());
        }

        let entries: Vec<IndexEntry> = persisted
            .entries
            .into_iter()
            .filter_map(|entry| {
                let chunk_id = Uuid::parse_str(&entry.chunk_id).ok()?;
                let document_id = Uuid::parse_str(&entry.document_id).ok()?;
                Some(IndexEntry {
                    chunk: Chunk {
                        id: ChunkId::from_uuid(chunk_id),
                        text: entry.text,
                        document_id: DocumentId::from_uuid(document_id),
                        page: entry.page,
                        offset: entry.offset,
                    },
                    embedding: Embedding::new(entry.embedding),
                })
            })
            .collect();

        info!(count = entries.len(), "index loaded from disk");
        *self.entries.write().await = entries;
        Ok(())
    }

    async fn persist(&self, entries: &[IndexEntry]) -> Result<(), VectorStoreError> {
        let persisted = PersistedIndex {
            version: FORMAT_VERSION,
            model: self.model.clone(),
            entries: entries
                .iter()
                .map(|entry| PersistedEntry {
                    chunk_id: entry.chunk.id.as_uuid().to_string(),
                    document_id: entry.chunk.document_id.as_uuid().to_string(),
                    page: entry.chunk.page,
                    offset: entry.chunk.offset,
                    text: entry.chunk.text.clone(),
                    embedding: entry.embedding.values.clone(),
                })
                .collect(),
        };

        let data = serde_json::to_vec(&persisted)
            .map_err(|e| VectorStoreError::PersistenceFailed(e.to_string()))?;
        tokio::fs::write(self.index_path(), data)
            .await
            .map_err(|e| VectorStoreError::PersistenceFailed(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl VectorStore for DiskVectorStore {
    #[instrument(skip(self), fields(index = %self.index_dir.display()))]
    async fn rebuild(&self) -> Result<(), VectorStoreError> {
        let mut entries = self.entries.write().await;
        entries.clear();

        match tokio::fs::remove_file(self.index_path()).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(VectorStoreError::PersistenceFailed(e.to_string())),
        }

        info!("index cleared");
        Ok(())
    }

    #[instrument(skip(self, chunks, embeddings), fields(index = %self.index_dir.display(), count = chunks.len()))]
    async fn upsert(
        &self,
        chunks: &[Chunk],
        embeddings: &[Embedding],
    ) -> Result<(), VectorStoreError> {
        if chunks.len() != embeddings.len() {
            return Err(VectorStoreError::UpsertFailed(
                "chunks and embeddings count mismatch".to_string(),
            ));
        }

        let mut entries = self.entries.write().await;
        for (chunk, embedding) in chunks.iter().zip(embeddings.iter()) {
            entries.retain(|entry| entry.chunk.id != chunk.id);
            entries.push(IndexEntry {
                chunk: chunk.clone(),
                embedding: embedding.clone(),
            });
        }

        self.persist(&entries).await?;

        info!(count = chunks.len(), "entries upserted");
        Ok(())
    }

    #[instrument(skip(self, embedding), fields(index = %self.index_dir.display(), top_k = top_k))]
    async fn search(
        &self,
        embedding: &Embedding,
        top_k: usize,
    ) -> Result<Vec<SearchResult>, VectorStoreError> {
        let entries = self.entries.read().await;

        let mut scored: Vec<SearchResult> = entries
            .iter()
            .map(|entry| SearchResult {
                chunk: entry.chunk.clone(),
                score: embedding.cosine_similarity(&entry.embedding),
            })
            .collect();

        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored.truncate(top_k);

        Ok(scored)
    }
}
