//! # Repository
//!
//! Loads and saves one whole collection at a time. The actor never touches the
//! [`KeyValueStore`] directly; it goes through a [`Repository`], which keeps the
//! storage backend swappable without touching any entity logic.

use crate::storage::{KeyValueStore, StorageError};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::debug;

/// Full-collection persistence for one entity type.
#[async_trait]
pub trait Repository<T>: Send + Sync {
    /// Reads the stored collection. An absent document is an empty collection.
    async fn load_all(&self) -> Result<Vec<T>, StorageError>;

    /// Replaces the stored collection.
    async fn save_all(&self, items: &[T]) -> Result<(), StorageError>;
}

/// Stores a collection as a JSON array under a single key.
pub struct DocumentRepository<T> {
    store: Arc<dyn KeyValueStore>,
    key: &'static str,
    _entity: PhantomData<fn() -> T>,
}

impl<T> DocumentRepository<T> {
    pub fn new(store: Arc<dyn KeyValueStore>, key: &'static str) -> Self {
        Self {
            store,
            key,
            _entity: PhantomData,
        }
    }

    pub fn key(&self) -> &'static str {
        self.key
    }
}

#[async_trait]
impl<T> Repository<T> for DocumentRepository<T>
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    async fn load_all(&self) -> Result<Vec<T>, StorageError> {
        let Some(text) = self.store.get(self.key).await? else {
            debug!(key = self.key, "No stored collection, starting empty");
            return Ok(Vec::new());
        };
        serde_json::from_str(&text).map_err(|source| StorageError::Corrupt {
            key: self.key.to_string(),
            source,
        })
    }

    async fn save_all(&self, items: &[T]) -> Result<(), StorageError> {
        let text = serde_json::to_string(items).map_err(|source| StorageError::Encode {
            key: self.key.to_string(),
            source,
        })?;
        self.store.set(self.key, text).await
    }
}
