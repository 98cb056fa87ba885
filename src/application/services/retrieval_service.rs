use std::sync::Arc;

use crate::application::ports::{
    Embedder, EmbedderError, LlmClient, LlmClientError, VectorStore, VectorStoreError,
};

use super::PromptTemplate;

/// Retrieval-augmented answer chain: embed the question, fetch the most
/// similar chunks, render them with the question into the prompt, and ask
/// the language model.
pub struct RetrievalService {
    embedder: Arc<dyn Embedder>,
    llm_client: Arc<dyn LlmClient>,
    vector_store: Arc<dyn VectorStore>,
    prompt: PromptTemplate,
    top_k: usize,
}

impl RetrievalService {
    pub fn new(
        embedder: Arc<dyn Embedder>,
        llm_client: Arc<dyn LlmClient>,
        vector_store: Arc<dyn VectorStore>,
        prompt: PromptTemplate,
        top_k: usize,
    ) -> Self {
        Self {
            embedder,
            llm_client,
            vector_store,
            prompt,
            top_k,
        }
    }

    pub async fn answer(&self, question: &str) -> Result<QueryResponse, RetrievalError> {
        let query_embedding = self
            .embedder
            .embed(question)
            .await
            .map_err(RetrievalError::Embedding)?;

        let results = self
            .vector_store
            .search(&query_embedding, self.top_k)
            .await
            .map_err(RetrievalError::Search)?;

        // An empty result set still goes to the model; the template
        // instruction produces the "cannot find" wording.
        let context = results
            .iter()
            .map(|r| r.chunk.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");

        let prompt = self.prompt.render(&context, question);

        let answer = self
            .llm_client
            .complete(&prompt)
            .await
            .map_err(RetrievalError::Completion)?;

        let sources = results
            .into_iter()
            .map(|r| SourceChunk {
                text: r.chunk.text,
                page: r.chunk.page,
                score: r.score,
            })
            .collect();

        Ok(QueryResponse { answer, sources })
    }
}

#[derive(Debug, Clone)]
pub struct QueryResponse {
    pub answer: String,
    pub sources: Vec<SourceChunk>,
}

#[derive(Debug, Clone)]
pub struct SourceChunk {
    pub text: String,
    pub page: u32,
    pub score: f32,
}

#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("embedding: {0}")]
    Embedding(EmbedderError),
    #[error("search: {0}")]
    Search(#[from] VectorStoreError),
    #[error("completion: {0}")]
    Completion(LlmClientError),
}
