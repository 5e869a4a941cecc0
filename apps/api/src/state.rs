use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::CompletionService;
use crate::repository::{CvRepository, JobRepository, MatchRepository};
use crate::storage::FileStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Completion capability. Production: AnthropicClient; tests: scripted stubs.
    pub llm: Arc<dyn CompletionService>,
    /// Raw PDF archival.
    pub files: Arc<dyn FileStore>,
    pub cvs: Arc<dyn CvRepository>,
    pub jobs: Arc<dyn JobRepository>,
    pub matches: Arc<dyn MatchRepository>,
}
