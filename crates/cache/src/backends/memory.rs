//! Bounded in-process edge cache.

use crate::error::CacheResult;
use crate::traits::{CachedResponse, EdgeCache};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use tokio::sync::RwLock;

struct Entries {
    map: HashMap<String, CachedResponse>,
    // Insertion order for eviction. Oldest key is evicted first once the
    // bound is hit; re-stores under a live key do not refresh the order.
    order: VecDeque<String>,
}

/// In-process edge cache bounded by entry count.
pub struct MemoryCache {
    max_entries: usize,
    entries: RwLock<Entries>,
}

impl MemoryCache {
    /// Create a cache holding at most `max_entries` responses.
    pub fn new(max_entries: usize) -> Self {
        Self {
            max_entries: max_entries.max(1),
            entries: RwLock::new(Entries {
                map: HashMap::new(),
                order: VecDeque::new(),
            }),
        }
    }

    /// Number of currently cached responses.
    pub async fn len(&self) -> usize {
        self.entries.read().await.map.len()
    }

    /// Whether the cache holds no responses.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl EdgeCache for MemoryCache {
    async fn lookup(&self, cache_key: &str) -> CacheResult<Option<CachedResponse>> {
        Ok(self.entries.read().await.map.get(cache_key).cloned())
    }

    async fn store(&self, cache_key: &str, response: CachedResponse) -> CacheResult<()> {
        let mut entries = self.entries.write().await;

        if entries.map.insert(cache_key.to_string(), response).is_none() {
            entries.order.push_back(cache_key.to_string());
        }

        while entries.map.len() > self.max_entries {
            match entries.order.pop_front() {
                Some(oldest) => {
                    entries.map.remove(&oldest);
                }
                None => break,
            }
        }

        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
