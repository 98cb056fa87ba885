mod ingestion_service;
mod prompt_template;
mod retrieval_service;

pub use ingestion_service::{CorpusSplit, IngestionError, IngestionService};
pub use prompt_template::PromptTemplate;
pub use retrieval_service::{QueryResponse, RetrievalError, RetrievalService, SourceChunk};
