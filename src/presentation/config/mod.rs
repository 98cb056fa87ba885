mod settings;

pub use settings::{
    ChunkingSettings, CorpusSettings, IndexSettings, OllamaSettings, RetrievalSettings, Settings,
};
