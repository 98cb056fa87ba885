use std::sync::Arc;

use askpapers::application::ports::{
    Embedder, EmbedderError, LlmClient, LlmClientError, SearchResult, VectorStore,
    VectorStoreError,
};
use askpapers::application::services::{PromptTemplate, RetrievalError, RetrievalService};
use askpapers::domain::{Chunk, DocumentId, Embedding};

const TEST_TOP_K: usize = 4;

struct MockEmbedder;

#[async_trait::async_trait]
impl Embedder for MockEmbedder {
    async fn embed(&self, _text: &str) -> Result<Embedding, EmbedderError> {
        Ok(Embedding::new(vec![0.1; 8]))
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, EmbedderError> {
        Ok(texts.iter().map(|_| Embedding::new(vec![0.1; 8])).collect())
    }
}

struct FailingEmbedder;

#[async_trait::async_trait]
impl Embedder for FailingEmbedder {
    async fn embed(&self, _text: &str) -> Result<Embedding, EmbedderError> {
        Err(EmbedderError::ApiRequestFailed("connection refused".to_string()))
    }

    async fn embed_batch(&self, _texts: &[&str]) -> Result<Vec<Embedding>, EmbedderError> {
        Err(EmbedderError::ApiRequestFailed("connection refused".to_string()))
    }
}

/// Stub model that honors the template instruction: answers from the
/// context when there is one, states inability otherwise.
struct InstructionFollowingLlm;

#[async_trait::async_trait]
impl LlmClient for InstructionFollowingLlm {
    async fn complete(&self, prompt: &str) -> Result<String, LlmClientError> {
        let context = prompt
            .split("**Context:**")
            .nth(1)
            .and_then(|rest| rest.split("**Question:**").next())
            .unwrap_or("")
            .trim();

        if context.is_empty() {
            Ok("I cannot find the information in the provided documents.".to_string())
        } else {
            Ok(format!("Based on the papers: {context}"))
        }
    }
}

struct FailingLlm;

#[async_trait::async_trait]
impl LlmClient for FailingLlm {
    async fn complete(&self, _prompt: &str) -> Result<String, LlmClientError> {
        Err(LlmClientError::ApiRequestFailed("model not loaded".to_string()))
    }
}

struct StaticVectorStore {
    results: Vec<(String, u32, f32)>,
}

#[async_trait::async_trait]
impl VectorStore for StaticVectorStore {
    async fn rebuild(&self) -> Result<(), VectorStoreError> {
        Ok(())
    }

    async fn upsert(
        &self,
        _chunks: &[Chunk],
        _embeddings: &[Embedding],
    ) -> Result<(), VectorStoreError> {
        Ok(())
    }

    async fn search(
        &self,
        _embedding: &Embedding,
        _top_k: usize,
    ) -> Result<Vec<SearchResult>, VectorStoreError> {
        Ok(self
            .results
            .iter()
            .map(|(text, page, score)| SearchResult {
                chunk: Chunk::new(text.clone(), DocumentId::new(), *page, 0),
                score: *score,
            })
            .collect())
    }
}

fn service(
    embedder: Arc<dyn Embedder>,
    llm_client: Arc<dyn LlmClient>,
    vector_store: Arc<dyn VectorStore>,
) -> RetrievalService {
    RetrievalService::new(
        embedder,
        llm_client,
        vector_store,
        PromptTemplate::default(),
        TEST_TOP_K,
    )
}

#[tokio::test]
async fn given_relevant_context_when_answering_then_answer_reflects_the_fact() {
    let store = Arc::new(StaticVectorStore {
        results: vec![("The sky appears blue due to Rayleigh scattering.".to_string(), 3, 0.92)],
    });
    let service = service(Arc::new(MockEmbedder), Arc::new(InstructionFollowingLlm), store);

    let response = service.answer("Why is the sky blue?").await.unwrap();

    assert!(response.answer.contains("Rayleigh scattering"));
}

#[tokio::test]
async fn given_empty_index_when_answering_then_answer_states_inability() {
    let store = Arc::new(StaticVectorStore { results: vec![] });
    let service = service(Arc::new(MockEmbedder), Arc::new(InstructionFollowingLlm), store);

    let response = service.answer("What is the airspeed of a swallow?").await.unwrap();

    assert!(response.answer.contains("cannot find the information"));
    assert!(response.sources.is_empty());
}

#[tokio::test]
async fn given_search_results_when_answering_then_sources_carry_page_and_score() {
    let store = Arc::new(StaticVectorStore {
        results: vec![
            ("first passage".to_string(), 2, 0.9),
            ("second passage".to_string(), 7, 0.8),
        ],
    });
    let service = service(Arc::new(MockEmbedder), Arc::new(InstructionFollowingLlm), store);

    let response = service.answer("a question").await.unwrap();

    assert_eq!(response.sources.len(), 2);
    assert_eq!(response.sources[0].page, 2);
    assert_eq!(response.sources[0].score, 0.9);
    assert_eq!(response.sources[1].page, 7);
}

#[tokio::test]
async fn given_multiple_results_when_answering_then_context_joins_all_chunks() {
    let store = Arc::new(StaticVectorStore {
        results: vec![
            ("alpha finding".to_string(), 1, 0.9),
            ("beta finding".to_string(), 2, 0.8),
        ],
    });
    let service = service(Arc::new(MockEmbedder), Arc::new(InstructionFollowingLlm), store);

    let response = service.answer("what was found?").await.unwrap();

    assert!(response.answer.contains("alpha finding"));
    assert!(response.answer.contains("beta finding"));
}

#[tokio::test]
async fn given_embedder_failure_when_answering_then_returns_embedding_error() {
    let store = Arc::new(StaticVectorStore { results: vec![] });
    let service = service(Arc::new(FailingEmbedder), Arc::new(InstructionFollowingLlm), store);

    let result = service.answer("a question").await;

    assert!(matches!(result, Err(RetrievalError::Embedding(_))));
}

#[tokio::test]
async fn given_llm_failure_when_answering_then_returns_completion_error() {
    let store = Arc::new(StaticVectorStore {
        results: vec![("context".to_string(), 1, 0.9)],
    });
    let service = service(Arc::new(MockEmbedder), Arc::new(FailingLlm), store);

    let result = service.answer("a question").await;

    assert!(matches!(result, Err(RetrievalError::Completion(_))));
}
