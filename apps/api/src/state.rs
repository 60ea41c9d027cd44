use std::sync::Arc;

use crate::config::Config;
use crate::semantic::EmbeddingProvider;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable embedding backend. Production uses `OpenAiEmbeddings`; tests swap in a mock.
    pub embeddings: Arc<dyn EmbeddingProvider>,
}
