//! Configuration types shared across crates.

use crate::negotiate::NegotiationPolicy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Server configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Negotiation policy for the image route.
    #[serde(default = "default_negotiation")]
    pub negotiation: NegotiationPolicy,
}

fn default_bind() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_negotiation() -> NegotiationPolicy {
    NegotiationPolicy::ResizeCapable
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            negotiation: default_negotiation(),
        }
    }
}

/// Origin storage backend configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StorageConfig {
    /// Local filesystem origin.
    Filesystem {
        /// Root directory holding original images.
        path: PathBuf,
    },
    /// In-memory origin for tests and demos.
    Memory,
}

impl StorageConfig {
    /// Validate the configuration, returning a message for the first
    /// problem found.
    pub fn validate(&self) -> std::result::Result<(), String> {
        match self {
            StorageConfig::Filesystem { path } => {
                if path.as_os_str().is_empty() {
                    return Err("storage.path must not be empty".to_string());
                }
                Ok(())
            }
            StorageConfig::Memory => Ok(()),
        }
    }
}

/// Edge cache configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CacheConfig {
    /// Bounded in-process cache.
    Memory {
        /// Maximum number of cached responses before eviction.
        #[serde(default = "default_max_entries")]
        max_entries: usize,
    },
    /// No edge cache; every lookup misses.
    Disabled,
}

fn default_max_entries() -> usize {
    1024
}

impl Default for CacheConfig {
    fn default() -> Self {
        CacheConfig::Memory {
            max_entries: default_max_entries(),
        }
    }
}

/// Top-level application configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Origin storage backend.
    pub storage: StorageConfig,
    /// Edge cache backend.
    #[serde(default)]
    pub cache: CacheConfig,
}

impl AppConfig {
    /// Create a test configuration backed by in-memory collaborators.
    ///
    /// **For testing only.**
    pub fn for_testing() -> Self {
        Self {
            server: ServerConfig::default(),
            storage: StorageConfig::Memory,
            cache: CacheConfig::Memory { max_entries: 64 },
        }
    }
}
