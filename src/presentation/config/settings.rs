use std::path::PathBuf;

/// Process configuration. The corpus path, index path, and model names
/// are deliberately fixed; there are no command-line flags and no
/// environment overrides for them.
#[derive(Debug, Clone)]
pub struct Settings {
    pub corpus: CorpusSettings,
    pub index: IndexSettings,
    pub ollama: OllamaSettings,
    pub chunking: ChunkingSettings,
    pub retrieval: RetrievalSettings,
}

#[derive(Debug, Clone)]
pub struct CorpusSettings {
    pub papers_dir: PathBuf,
}

#[derive(Debug, Clone)]
pub struct IndexSettings {
    pub persist_dir: PathBuf,
}

#[derive(Debug, Clone)]
pub struct OllamaSettings {
    pub base_url: String,
    pub embedding_model: String,
    pub chat_model: String,
}

#[derive(Debug, Clone)]
pub struct ChunkingSettings {
    pub chunk_size: usize,
    pub chunk_overlap: usize,
}

#[derive(Debug, Clone)]
pub struct RetrievalSettings {
    pub top_k: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            corpus: CorpusSettings {
                papers_dir: PathBuf::from("papers"),
            },
            index: IndexSettings {
                persist_dir: PathBuf::from("./chroma_db"),
            },
            ollama: OllamaSettings {
                base_url: "http://localhost:11434".to_string(),
                embedding_model: "nomic-embed-text".to_string(),
                chat_model: "llama3".to_string(),
            },
            chunking: ChunkingSettings {
                chunk_size: 1000,
                chunk_overlap: 200,
            },
            retrieval: RetrievalSettings { top_k: 4 },
        }
    }
}
