//! # Blob Storage
//!
//! Key-value persistence for the serialized cart.
//!
//! A write always replaces the whole value. There are no transactions
//! spanning a write and the in-memory state; [`CartStore`](crate::CartStore)
//! writes first and only publishes the new cart once the write succeeded.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use cart_db::{BlobRepository, Database};

use crate::error::StorageError;

/// String values stored under string keys.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Reads the value under `key`, `None` when nothing is stored.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replaces the value under `key`.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

// =============================================================================
// SQLite
// =============================================================================

/// [`BlobStore`] backed by the local SQLite database.
#[derive(Debug, Clone)]
pub struct SqliteBlobStore {
    repo: BlobRepository,
}

impl SqliteBlobStore {
    pub fn new(db: &Database) -> Self {
        SqliteBlobStore { repo: db.blobs() }
    }
}

#[async_trait]
impl BlobStore for SqliteBlobStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.repo.get(key).await?)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Ok(self.repo.set(key, value).await?)
    }
}

// =============================================================================
// Memory
// =============================================================================

/// [`BlobStore`] kept in process memory. Clones share the same values.
#[derive(Debug, Clone, Default)]
pub struct MemoryBlobStore {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        MemoryBlobStore::default()
    }

    /// Creates a store that already holds `value` under `key`.
    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        let store = MemoryBlobStore::default();
        if let Ok(mut values) = store.values.lock() {
            values.insert(key.into(), value.into());
        }
        store
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, StorageError> {
        self.values
            .lock()
            .map_err(|_| StorageError::Unavailable("memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.lock()?.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cart_db::DbConfig;

    #[tokio::test]
    async fn test_memory_store() {
        let store = MemoryBlobStore::new();
        assert_eq!(store.get("k").await.unwrap(), None);

        store.set("k", "v1").await.unwrap();
        store.set("k", "v2").await.unwrap();

        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v2"));
    }

    #[tokio::test]
    async fn test_memory_store_clones_share_values() {
        let store = MemoryBlobStore::with_value("k", "seed");
        let other = store.clone();

        other.set("k", "changed").await.unwrap();

        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("changed"));
    }

    #[tokio::test]
    async fn test_sqlite_store() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let store = SqliteBlobStore::new(&db);

        assert_eq!(store.get("@RocketShoes:cart").await.unwrap(), None);

        store.set("@RocketShoes:cart", "[]").await.unwrap();

        assert_eq!(
            store.get("@RocketShoes:cart").await.unwrap().as_deref(),
            Some("[]")
        );
    }

    #[tokio::test]
    async fn test_sqlite_store_reports_closed_database() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let store = SqliteBlobStore::new(&db);
        db.close().await;

        let err = store.set("k", "v").await.unwrap_err();
        assert!(matches!(err, StorageError::Db(_)));
    }
}
