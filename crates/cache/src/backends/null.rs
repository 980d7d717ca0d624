//! No-op edge cache for cache-less deployments.

use crate::error::CacheResult;
use crate::traits::{CachedResponse, EdgeCache};
use async_trait::async_trait;

/// Edge cache that never hits. Lookups miss and stores are discarded.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullCache;

impl NullCache {
    /// Create a no-op cache.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EdgeCache for NullCache {
    async fn lookup(&self, _cache_key: &str) -> CacheResult<Option<CachedResponse>> {
        Ok(None)
    }

    async fn store(&self, _cache_key: &str, _response: CachedResponse) -> CacheResult<()> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "null"
    }
}
