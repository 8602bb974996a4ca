use std::sync::Arc;

use crate::advisor::tracker::AnalysisTracker;
use crate::data::Datasets;
use crate::llm_client::LlmGateway;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Gemini client in production; a canned gateway in tests.
    pub llm: Arc<dyn LlmGateway>,
    /// The four static datasets, immutable after startup.
    pub datasets: Arc<Datasets>,
    /// Latest analysis for the interactive session.
    pub analysis: Arc<AnalysisTracker>,
}

impl AppState {
    pub fn new(llm: Arc<dyn LlmGateway>, datasets: Datasets) -> Self {
        Self {
            llm,
            datasets: Arc::new(datasets),
            analysis: Arc::new(AnalysisTracker::new()),
        }
    }
}
