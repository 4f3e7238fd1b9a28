use std::sync::Arc;

use crate::db::Database;
use crate::summarizer::Summarizer;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    /// `None` when the summarizer failed to initialize at startup; the
    /// service then stores transcripts but skips summarization.
    pub summarizer: Option<Arc<dyn Summarizer>>,
}

impl AppState {
    pub fn new(db: Arc<Database>, summarizer: Option<Arc<dyn Summarizer>>) -> Self {
        Self { db, summarizer }
    }
}
