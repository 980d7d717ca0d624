//! Origin object store abstraction and backends for darkroom.
//!
//! This crate provides:
//! - The [`ImageStore`] trait the gateway reads originals through
//! - Backends: local filesystem and in-memory
//! - Etag derivation for stored bytes

pub mod backends;
pub mod error;
pub mod traits;

pub use backends::{filesystem::FilesystemBackend, memory::MemoryBackend};
pub use error::{StorageError, StorageResult};
pub use traits::{ImageStore, SourceObject};

use darkroom_core::config::StorageConfig;
use sha2::{Digest, Sha256};
use std::sync::Arc;

/// Create an origin store from configuration.
pub async fn from_config(config: &StorageConfig) -> StorageResult<Arc<dyn ImageStore>> {
    config.validate().map_err(StorageError::Config)?;

    match config {
        StorageConfig::Filesystem { path } => {
            let backend = FilesystemBackend::new(path).await?;
            Ok(Arc::new(backend))
        }
        StorageConfig::Memory => Ok(Arc::new(MemoryBackend::new())),
    }
}

/// Compute the entity tag for stored bytes: SHA-256 as lowercase hex.
pub fn etag_for(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}
