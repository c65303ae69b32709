//! Application state shared across handlers.

use std::sync::Arc;

use crate::ingest::Ingestor;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Renders and upserts incoming alerts.
    pub ingestor: Arc<Ingestor>,
}

impl AppState {
    /// Create new application state.
    pub fn new(ingestor: Ingestor) -> Self {
        Self {
            ingestor: Arc::new(ingestor),
        }
    }
}
