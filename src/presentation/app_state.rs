use std::sync::Arc;

use crate::application::services::{IngestionService, RetrievalService};

/// Process-lifetime object graph, constructed once at startup and passed
/// into the query loop. No global state.
pub struct AppState {
    pub ingestion_service: Arc<IngestionService>,
    pub retrieval_service: Arc<RetrievalService>,
}
