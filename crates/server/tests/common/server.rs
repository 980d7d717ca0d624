//! Server test utilities.

use crate::common::fakes::{CountingCodec, CountingStore};
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use bytes::Bytes;
use darkroom_cache::MemoryCache;
use darkroom_core::config::AppConfig;
use darkroom_server::{AppState, create_router};
use darkroom_storage::ImageStore;
use std::sync::Arc;
use tower::ServiceExt;

/// A test server wrapper with counting fakes for every collaborator.
/// Note: #[allow(dead_code)] because each test file compiles common/ separately.
#[allow(dead_code)]
pub struct TestServer {
    pub router: axum::Router,
    pub state: AppState,
    pub storage: Arc<CountingStore>,
    pub cache: Arc<MemoryCache>,
    pub codec: Arc<CountingCodec>,
}

#[allow(dead_code)]
impl TestServer {
    /// Create a test server with the default (resize-capable) config.
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    /// Create a test server with custom config modifications.
    pub async fn with_config<F>(modifier: F) -> Self
    where
        F: FnOnce(&mut AppConfig),
    {
        Self::build(modifier, CountingCodec::new())
    }

    /// Create a test server whose codec fails every transform.
    pub async fn with_failing_codec() -> Self {
        Self::build(|_| {}, CountingCodec::failing())
    }

    fn build<F>(modifier: F, codec: CountingCodec) -> Self
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut config = AppConfig::for_testing();
        modifier(&mut config);

        let storage = Arc::new(CountingStore::new());
        let cache = Arc::new(MemoryCache::new(64));
        let codec = Arc::new(codec);

        let state = AppState::new(config, storage.clone(), cache.clone(), codec.clone());
        let router = create_router(state.clone());

        Self {
            router,
            state,
            storage,
            cache,
            codec,
        }
    }

    /// Seed an object into the origin store.
    pub async fn seed(&self, key: &str, bytes: impl Into<Bytes>, content_type: Option<&str>) {
        self.storage
            .put(key, bytes.into(), content_type)
            .await
            .expect("Failed to seed origin object");
    }

    /// Issue a GET request and collect status, headers, and body.
    pub async fn get(&self, uri: &str, accept: Option<&str>) -> (StatusCode, HeaderMap, Bytes) {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(accept) = accept {
            builder = builder.header("Accept", accept);
        }
        let request = builder.body(Body::empty()).unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        (status, headers, body)
    }

    /// Issue a GET request and parse the body as JSON.
    pub async fn get_json(
        &self,
        uri: &str,
        accept: Option<&str>,
    ) -> (StatusCode, serde_json::Value) {
        let (status, _headers, body) = self.get(uri, accept).await;
        let json = if body.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null)
        };
        (status, json)
    }

    /// Wait for all scheduled background cache writes to settle, like the
    /// runtime does before tearing a request context down.
    pub async fn drain_background(&self) {
        self.state.drain_background().await;
    }
}
