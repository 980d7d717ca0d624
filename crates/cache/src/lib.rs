//! Edge cache abstraction and backends for darkroom.
//!
//! This crate provides:
//! - The [`EdgeCache`] trait the gateway consults before transcoding
//! - The [`CachedResponse`] record stored under canonical cache keys
//! - Backends: bounded in-process memory and a no-op null cache

pub mod backends;
pub mod error;
pub mod traits;

pub use backends::{memory::MemoryCache, null::NullCache};
pub use error::{CacheError, CacheResult};
pub use traits::{CachedResponse, EdgeCache};

use darkroom_core::config::CacheConfig;
use std::sync::Arc;

/// Create an edge cache from configuration.
pub fn from_config(config: &CacheConfig) -> Arc<dyn EdgeCache> {
    match config {
        CacheConfig::Memory { max_entries } => Arc::new(MemoryCache::new(*max_entries)),
        CacheConfig::Disabled => Arc::new(NullCache::new()),
    }
}
