//! In-memory origin backend for tests and demos.

use crate::error::{StorageError, StorageResult};
use crate::etag_for;
use crate::traits::{ImageStore, SourceObject};
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use tokio::sync::RwLock;

struct StoredObject {
    bytes: Bytes,
    content_type: Option<String>,
    etag: String,
}

/// In-memory origin store.
#[derive(Default)]
pub struct MemoryBackend {
    objects: RwLock<HashMap<String, StoredObject>>,
}

impl MemoryBackend {
    /// Create an empty in-memory backend.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ImageStore for MemoryBackend {
    async fn get(&self, key: &str) -> StorageResult<SourceObject> {
        let objects = self.objects.read().await;
        let stored = objects
            .get(key)
            .ok_or_else(|| StorageError::NotFound(key.to_string()))?;

        Ok(SourceObject {
            key: key.to_string(),
            bytes: stored.bytes.clone(),
            content_type: stored.content_type.clone(),
            etag: stored.etag.clone(),
        })
    }

    async fn put(&self, key: &str, data: Bytes, content_type: Option<&str>) -> StorageResult<()> {
        let etag = etag_for(&data);
        self.objects.write().await.insert(
            key.to_string(),
            StoredObject {
                bytes: data,
                content_type: content_type.map(str::to_string),
                etag,
            },
        );
        Ok(())
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        Ok(self.objects.read().await.contains_key(key))
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
