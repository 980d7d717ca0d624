//! Edge cache trait definitions.

use crate::error::CacheResult;
use async_trait::async_trait;
use bytes::Bytes;

/// A response body plus the headers the gateway replays on a hit.
#[derive(Clone, Debug, PartialEq)]
pub struct CachedResponse {
    /// The `Content-Type` the response was stored with.
    pub content_type: String,
    /// The `Cache-Control` the response was stored with.
    pub cache_control: String,
    /// The `ETag`, present only when the cached bytes are an unmodified
    /// source object.
    pub etag: Option<String>,
    /// The response body.
    pub body: Bytes,
}

/// Edge cache abstraction keyed by canonical cache keys.
///
/// Stores are best-effort: two concurrent misses on the same key may
/// both transform and both store. Last write wins; the gateway never
/// relies on a single-writer guarantee.
#[async_trait]
pub trait EdgeCache: Send + Sync + 'static {
    /// Look up a previously stored response.
    async fn lookup(&self, cache_key: &str) -> CacheResult<Option<CachedResponse>>;

    /// Store a response under the key.
    async fn store(&self, cache_key: &str, response: CachedResponse) -> CacheResult<()>;

    /// Get the name of this cache backend.
    ///
    /// Returns a static string identifier (e.g., "memory", "null").
    /// Used for logging.
    fn backend_name(&self) -> &'static str;
}
