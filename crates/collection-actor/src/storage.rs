//! # Key-Value Storage
//!
//! The persistence provider every collection lives in: a flat map from string
//! keys to whole JSON documents. There are no partial updates and no querying;
//! a write always replaces the full document stored under a key.
//!
//! Two backends ship with the crate:
//!
//! | Backend | Durability | Use Case |
//! |---------|------------|----------|
//! | [`MemoryStore`] | Process lifetime | Tests, demos |
//! | [`FileStore`] | One `<key>.json` file per key | The CLI, anything that must survive a restart |

use async_trait::async_trait;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, trace};

/// Errors raised by a [`KeyValueStore`] or by decoding what it holds.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("failed to read `{key}`: {source}")]
    Read {
        key: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to write `{key}`: {source}")]
    Write {
        key: String,
        #[source]
        source: io::Error,
    },
    #[error("document under `{key}` is not a valid collection: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode collection for `{key}`: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A flat document store.
///
/// Implementations must resolve every call exactly once; callers never retry.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the document stored under `key`, or `None` if nothing was ever written.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replaces the document stored under `key`.
    async fn set(&self, key: &str, value: String) -> Result<(), StorageError>;
}

/// In-memory store. Cloning the `Arc` it is usually wrapped in shares the data.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.documents.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        trace!(key, bytes = value.len(), "MemoryStore set");
        self.documents.lock().await.insert(key.to_string(), value);
        Ok(())
    }
}

/// Directory-backed store: each key maps to `<dir>/<key>.json`.
///
/// Keys are reduced to `[A-Za-z0-9_-]` for the file name, so `@products`
/// lands in `products.json`. Writes go through a temporary file and a rename,
/// which keeps a crash from leaving half a document behind.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let stem: String = key
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
            .collect();
        self.root.join(format!("{stem}.json"))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        match tokio::fs::read_to_string(&path).await {
            Ok(text) => {
                debug!(key, path = %path.display(), "Loaded document");
                Ok(Some(text))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Read {
                key: key.to_string(),
                source,
            }),
        }
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        let write_err = |source| StorageError::Write {
            key: key.to_string(),
            source,
        };
        let path = self.path_for(key);
        let staging = path.with_extension("json.tmp");

        tokio::fs::create_dir_all(&self.root).await.map_err(write_err)?;
        tokio::fs::write(&staging, value.as_bytes())
            .await
            .map_err(write_err)?;
        tokio::fs::rename(&staging, &path).await.map_err(write_err)?;
        debug!(key, path = %path.display(), bytes = value.len(), "Stored document");
        Ok(())
    }
}
