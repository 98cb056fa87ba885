use std::process::ExitCode;
use std::sync::Arc;

use tokio::io::BufReader;

use askpapers::application::ports::{Embedder, FileLoader, LlmClient, TextSplitter, VectorStore};
use askpapers::application::services::{
    IngestionError, IngestionService, PromptTemplate, RetrievalService,
};
use askpapers::infrastructure::llm::{OllamaClient, OllamaEmbedder};
use askpapers::infrastructure::observability::{init_tracing, TracingConfig};
use askpapers::infrastructure::persistence::DiskVectorStore;
use askpapers::infrastructure::text_processing::{PdfAdapter, RecursiveCharacterSplitter};
use askpapers::presentation::{run_query_loop, AppState, Settings};

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing(TracingConfig::default());

    let settings = Settings::default();

    println!("Step 1: Loading and splitting documents...");

    let vector_store: Arc<dyn VectorStore> = match DiskVectorStore::open(
        &settings.index.persist_dir,
        settings.ollama.embedding_model.clone(),
    )
    .await
    {
        Ok(store) => Arc::new(store),
        Err(e) => {
            println!("Error loading documents: {e}");
            return ExitCode::from(1);
        }
    };

    let file_loader: Arc<dyn FileLoader> = Arc::new(PdfAdapter::new());
    let text_splitter: Arc<dyn TextSplitter> = Arc::new(RecursiveCharacterSplitter::new(
        settings.chunking.chunk_size,
        settings.chunking.chunk_overlap,
    ));
    let embedder: Arc<dyn Embedder> = Arc::new(OllamaEmbedder::new(
        settings.ollama.base_url.clone(),
        settings.ollama.embedding_model.clone(),
    ));
    let llm_client: Arc<dyn LlmClient> = Arc::new(OllamaClient::new(
        settings.ollama.base_url.clone(),
        settings.ollama.chat_model.clone(),
    ));

    let ingestion_service = Arc::new(IngestionService::new(
        file_loader,
        text_splitter,
        Arc::clone(&embedder),
        Arc::clone(&vector_store),
    ));

    let retrieval_service = Arc::new(RetrievalService::new(
        embedder,
        llm_client,
        vector_store,
        PromptTemplate::default(),
        settings.retrieval.top_k,
    ));

    let state = AppState {
        ingestion_service,
        retrieval_service,
    };

    let split = match state
        .ingestion_service
        .load_and_split(&settings.corpus.papers_dir)
        .await
    {
        Ok(split) => split,
        Err(IngestionError::NoDocuments) => {
            println!("Error: No documents found in the 'papers' directory. Please add your PDFs.");
            return ExitCode::from(1);
        }
        Err(e) => {
            println!("Error loading documents: {e}");
            return ExitCode::from(1);
        }
    };
    println!(
        "Loaded and split {} documents into {} chunks.",
        split.documents,
        split.chunks.len()
    );

    println!("Step 2: Creating vector store from document chunks...");
    if let Err(e) = state.ingestion_service.index(&split.chunks).await {
        println!("Error: {e}");
        return ExitCode::from(1);
    }
    println!("Vector store created successfully.");

    println!("Step 3: Building the RAG chain...");
    println!("RAG chain built successfully.");

    println!("\n--- AI Research Assistant is Ready ---");
    println!("You can now ask questions about your research papers. Type 'exit' to quit.");

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();

    if let Err(e) = run_query_loop(&state, stdin, &mut stdout).await {
        tracing::error!(error = %e, "terminal io failure");
    }

    ExitCode::SUCCESS
}
