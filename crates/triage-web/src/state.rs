//! Application state.

use std::sync::Arc;

use triage_core::HistoryLog;
use triage_ml::{RetrievalService, RootCauseClassifier, Summarizer};

/// Shared handles for all routes and stream sessions. Everything here is
/// read-only or internally synchronized, so cloning per-handler is cheap
/// and safe.
#[derive(Clone)]
pub struct AppState {
    pub retrieval: Arc<RetrievalService>,
    pub classifier: Arc<dyn RootCauseClassifier>,
    pub summarizer: Arc<dyn Summarizer>,
    pub history: Arc<HistoryLog>,
    pub batch_size: usize,
}

impl AppState {
    pub fn new(
        retrieval: Arc<RetrievalService>,
        classifier: Arc<dyn RootCauseClassifier>,
        summarizer: Arc<dyn Summarizer>,
        history: Arc<HistoryLog>,
        batch_size: usize,
    ) -> Self {
        Self {
            retrieval,
            classifier,
            summarizer,
            history,
            batch_size,
        }
    }
}
