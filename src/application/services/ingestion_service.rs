use std::path::Path;
use std::sync::Arc;

use crate::application::ports::{
    Embedder, EmbedderError, FileLoader, FileLoaderError, TextSplitter, TextSplitterError,
    VectorStore, VectorStoreError,
};
use crate::domain::{Chunk, Document};

/// Startup pipeline: corpus directory -> pages -> chunks -> vectors -> index.
///
/// Runs exactly once per process. Any failure is fatal; there is no
/// partial-success mode and no skipping of unreadable files.
pub struct IngestionService {
    file_loader: Arc<dyn FileLoader>,
    text_splitter: Arc<dyn TextSplitter>,
    embedder: Arc<dyn Embedder>,
    vector_store: Arc<dyn VectorStore>,
}

/// Result of the load-and-split stage, reported to the user before
/// embedding begins.
#[derive(Debug)]
pub struct CorpusSplit {
    pub documents: usize,
    pub chunks: Vec<Chunk>,
}

impl IngestionService {
    pub fn new(
        file_loader: Arc<dyn FileLoader>,
        text_splitter: Arc<dyn TextSplitter>,
        embedder: Arc<dyn Embedder>,
        vector_store: Arc<dyn VectorStore>,
    ) -> Self {
        Self {
            file_loader,
            text_splitter,
            embedder,
            vector_store,
        }
    }

    /// Read every PDF in `dir` (non-recursive, sorted by file name for
    /// deterministic chunk ordering), extract its pages, and split them
    /// into chunks.
    pub async fn load_and_split(&self, dir: &Path) -> Result<CorpusSplit, IngestionError> {
        let documents = self.scan_directory(dir).await?;
        if documents.is_empty() {
            return Err(IngestionError::NoDocuments);
        }

        let mut chunks = Vec::new();
        for document in &documents {
            let data = tokio::fs::read(&document.path).await?;
            let pages = self.file_loader.extract_pages(&data, document).await?;

            for page in &pages {
                chunks.extend(self.text_splitter.split(page).await?);
            }
        }

        if chunks.is_empty() {
            return Err(IngestionError::NoDocuments);
        }

        tracing::info!(
            documents = documents.len(),
            chunks = chunks.len(),
            "corpus loaded and split"
        );

        Ok(CorpusSplit {
            documents: documents.len(),
            chunks,
        })
    }

    /// Embed every chunk and persist the index, discarding any state a
    /// previous run left behind.
    pub async fn index(&self, chunks: &[Chunk]) -> Result<(), IngestionError> {
        self.vector_store.rebuild().await?;

        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        let embeddings = self.embedder.embed_batch(&texts).await?;

        self.vector_store.upsert(chunks, &embeddings).await?;

        tracing::info!(chunks = chunks.len(), "index built");
        Ok(())
    }

    async fn scan_directory(&self, dir: &Path) -> Result<Vec<Document>, IngestionError> {
        let mut entries = match tokio::fs::read_dir(dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(IngestionError::NoDocuments);
            }
            Err(e) => return Err(e.into()),
        };

        let mut documents = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let is_pdf = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
            if !is_pdf || !entry.file_type().await?.is_file() {
                continue;
            }

            let filename = entry.file_name().to_string_lossy().into_owned();
            let size_bytes = entry.metadata().await?.len();
            documents.push(Document::new(filename, path, size_bytes));
        }

        documents.sort_by(|a, b| a.filename.cmp(&b.filename));
        Ok(documents)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum IngestionError {
    #[error("no documents found")]
    NoDocuments,
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("file loading: {0}")]
    FileLoading(#[from] FileLoaderError),
    #[error("text splitting: {0}")]
    Splitting(#[from] TextSplitterError),
    #[error("embedding: {0}")]
    Embedding(#[from] EmbedderError),
    #[error("storage: {0}")]
    Storage(#[from] VectorStoreError),
}
