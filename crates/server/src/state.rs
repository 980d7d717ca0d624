//! Application state shared across handlers.

use darkroom_cache::EdgeCache;
use darkroom_codec::ImageCodec;
use darkroom_core::NegotiationEngine;
use darkroom_core::config::AppConfig;
use darkroom_storage::ImageStore;
use std::sync::Arc;
use tokio_util::task::TaskTracker;

/// Shared application state.
///
/// All collaborators are injected at construction so tests can
/// substitute in-memory fakes; nothing here is a module-level global.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Origin object store.
    pub storage: Arc<dyn ImageStore>,
    /// Edge cache.
    pub cache: Arc<dyn EdgeCache>,
    /// Pixel codec.
    pub codec: Arc<dyn ImageCodec>,
    /// Negotiation engine configured from the server policy.
    pub negotiation: NegotiationEngine,
    /// Tracker for background cache writes. The response path spawns
    /// onto it without awaiting; shutdown waits on it so in-flight
    /// writes finish before the process tears down.
    pub background: TaskTracker,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Panics
    ///
    /// Panics if the storage configuration fails validation.
    pub fn new(
        config: AppConfig,
        storage: Arc<dyn ImageStore>,
        cache: Arc<dyn EdgeCache>,
        codec: Arc<dyn ImageCodec>,
    ) -> Self {
        if let Err(error) = config.storage.validate() {
            panic!("Invalid storage configuration: {error}");
        }

        let negotiation = NegotiationEngine::new(config.server.negotiation);

        Self {
            config: Arc::new(config),
            storage,
            cache,
            codec,
            negotiation,
            background: TaskTracker::new(),
        }
    }

    /// Wait until every scheduled background task has finished.
    ///
    /// Used by graceful shutdown, and by tests that assert on cache
    /// contents after a response was already returned.
    pub async fn drain_background(&self) {
        self.background.close();
        self.background.wait().await;
        self.background.reopen();
    }
}
