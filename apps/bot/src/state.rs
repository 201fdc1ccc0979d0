use std::sync::Arc;

use crate::ingest::job_source::JobSource;
use crate::ingest::pdf::TextExtractor;
use crate::ingest::upload::UploadDir;
use crate::llm_client::Inference;
use crate::session::SessionStore;

/// Shared state injected into every update handler via the dispatcher's dependencies.
/// Each collaborator sits behind a trait so tests can swap in fakes.
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<dyn SessionStore>,
    pub extractor: Arc<dyn TextExtractor>,
    pub jobs: Arc<dyn JobSource>,
    pub llm: Arc<dyn Inference>,
    pub uploads: UploadDir,
}
