//! Local filesystem origin backend.
//!
//! Objects live at `<root>/<key>`; the recorded content type lives in a
//! sidecar file at `<root>/<key>.meta`. The etag is the SHA-256 of the
//! object bytes, computed on read.

use crate::error::{StorageError, StorageResult};
use crate::etag_for;
use crate::traits::{ImageStore, SourceObject};
use async_trait::async_trait;
use bytes::Bytes;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::instrument;

/// Suffix of the sidecar file recording an object's content type.
const META_SUFFIX: &str = ".meta";

/// Local filesystem origin store.
pub struct FilesystemBackend {
    root: PathBuf,
}

impl FilesystemBackend {
    /// Create a new filesystem backend rooted at `root`.
    pub async fn new(root: impl AsRef<Path>) -> StorageResult<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    /// Resolve a key under the root, rejecting anything that could
    /// escape it. Gateway keys are single segments by construction, but
    /// the backend guards independently.
    fn key_path(&self, key: &str) -> StorageResult<PathBuf> {
        if key.is_empty() || key.contains("..") || key.starts_with('/') || key.starts_with('\\') {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        for component in Path::new(key).components() {
            match component {
                std::path::Component::Normal(_) => {}
                _ => return Err(StorageError::InvalidKey(key.to_string())),
            }
        }
        Ok(self.root.join(key))
    }

    fn meta_path(&self, key: &str) -> StorageResult<PathBuf> {
        let mut path = self.key_path(key)?.into_os_string();
        path.push(META_SUFFIX);
        Ok(PathBuf::from(path))
    }

    /// Ensure parent directory exists.
    async fn ensure_parent(&self, path: &Path) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl ImageStore for FilesystemBackend {
    #[instrument(skip(self), fields(backend = "filesystem"))]
    async fn get(&self, key: &str) -> StorageResult<SourceObject> {
        let path = self.key_path(key)?;
        let data = fs::read(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::NotFound(key.to_string())
            } else {
                StorageError::Io(e)
            }
        })?;

        let content_type = match fs::read_to_string(self.meta_path(key)?).await {
            Ok(raw) => {
                let trimmed = raw.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => return Err(StorageError::Io(e)),
        };

        let etag = etag_for(&data);
        Ok(SourceObject {
            key: key.to_string(),
            bytes: Bytes::from(data),
            content_type,
            etag,
        })
    }

    #[instrument(skip(self, data), fields(backend = "filesystem", size = data.len()))]
    async fn put(&self, key: &str, data: Bytes, content_type: Option<&str>) -> StorageResult<()> {
        let path = self.key_path(key)?;
        self.ensure_parent(&path).await?;
        fs::write(&path, &data).await?;

        let meta_path = self.meta_path(key)?;
        match content_type {
            Some(ct) => fs::write(&meta_path, ct).await?,
            None => match fs::remove_file(&meta_path).await {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(StorageError::Io(e)),
            },
        }
        Ok(())
    }

    #[instrument(skip(self), fields(backend = "filesystem"))]
    async fn exists(&self, key: &str) -> StorageResult<bool> {
        let path = self.key_path(key)?;
        fs::try_exists(&path).await.map_err(StorageError::Io)
    }

    fn backend_name(&self) -> &'static str {
        "filesystem"
    }

    async fn health_check(&self) -> StorageResult<()> {
        // The root was created at construction; verify it is still there
        // and readable.
        fs::read_dir(&self.root).await?;
        Ok(())
    }
}
