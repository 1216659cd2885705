use std::sync::Arc;

use crate::assistant::AssistantGateway;
use crate::config::Config;
use crate::resumes::ResumeStore;
use crate::upload::FileStorage;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Resume persistence. Default: `PgResumeStore`.
    pub store: Arc<dyn ResumeStore>,
    /// Object storage for uploaded files. Default: `S3FileStorage`.
    pub files: Arc<dyn FileStorage>,
    pub assistant: AssistantGateway,
    pub config: Config,
}
