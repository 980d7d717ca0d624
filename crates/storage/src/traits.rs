//! Storage trait definitions.

use crate::error::StorageResult;
use async_trait::async_trait;
use bytes::Bytes;

/// A stored original image as returned by the origin backend.
#[derive(Clone, Debug)]
pub struct SourceObject {
    /// The key the object was fetched under.
    pub key: String,
    /// The original bytes.
    pub bytes: Bytes,
    /// Recorded content type, if one was stored with the object.
    pub content_type: Option<String>,
    /// Entity tag for the stored bytes.
    pub etag: String,
}

/// Origin object store abstraction.
///
/// The gateway only reads from the origin; `put` exists for seeding and
/// offline tooling.
#[async_trait]
pub trait ImageStore: Send + Sync + 'static {
    /// Fetch an object's bytes and metadata.
    ///
    /// Returns [`StorageError::NotFound`](crate::StorageError::NotFound)
    /// if the key has no object.
    async fn get(&self, key: &str) -> StorageResult<SourceObject>;

    /// Store an object, replacing any previous one under the key.
    async fn put(&self, key: &str, data: Bytes, content_type: Option<&str>) -> StorageResult<()>;

    /// Check if an object exists.
    async fn exists(&self, key: &str) -> StorageResult<bool>;

    /// Get the name of this storage backend.
    ///
    /// Returns a static string identifier for the backend type
    /// (e.g., "filesystem", "memory"). Used for logging.
    fn backend_name(&self) -> &'static str;

    /// Verify storage backend connectivity.
    ///
    /// Called during server startup so misconfiguration surfaces before
    /// any request is accepted. The default implementation returns
    /// `Ok(())`, suitable for backends with nothing to probe.
    async fn health_check(&self) -> StorageResult<()> {
        Ok(())
    }
}
