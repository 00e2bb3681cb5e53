use std::sync::Arc;

use crate::interview::registry::SessionRegistry;
use crate::llm_client::CompletionBackend;
use crate::store::Profiles;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Model backend. `LlmClient` in production, scripted in tests.
    pub llm: Arc<dyn CompletionBackend>,
    pub profiles: Profiles,
    pub sessions: SessionRegistry,
}
