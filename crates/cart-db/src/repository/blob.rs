//! # Blob Repository
//!
//! String values stored under string keys in the `kv_store` table.
//!
//! Every write fully replaces the previous value for the key. There is no
//! versioning or compare-and-swap: the last writer wins.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;

/// A stored value with its last write time.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct StoredBlob {
    pub key: String,
    pub value: String,
    pub updated_at: DateTime<Utc>,
}

/// Repository for key-value blobs.
///
/// ## Usage
/// ```rust,ignore
/// let repo = BlobRepository::new(pool);
///
/// repo.set("@RocketShoes:cart", "[]").await?;
/// assert_eq!(repo.get("@RocketShoes:cart").await?.as_deref(), Some("[]"));
/// ```
#[derive(Debug, Clone)]
pub struct BlobRepository {
    pool: SqlitePool,
}

impl BlobRepository {
    /// Creates a new BlobRepository.
    pub fn new(pool: SqlitePool) -> Self {
        BlobRepository { pool }
    }

    /// Reads the value stored under `key`.
    ///
    /// ## Returns
    /// * `Ok(Some(value))` - Key exists
    /// * `Ok(None)` - Nothing stored yet
    pub async fn get(&self, key: &str) -> DbResult<Option<String>> {
        Ok(self.get_entry(key).await?.map(|entry| entry.value))
    }

    /// Reads the full stored entry, including its write time.
    pub async fn get_entry(&self, key: &str) -> DbResult<Option<StoredBlob>> {
        debug!(key = %key, "Reading blob");

        let entry = sqlx::query_as::<_, StoredBlob>(
            r#"
            SELECT key, value, updated_at
            FROM kv_store
            WHERE key = ?1
            "#,
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entry)
    }

    /// Stores `value` under `key`, replacing whatever was there.
    pub async fn set(&self, key: &str, value: &str) -> DbResult<()> {
        debug!(key = %key, bytes = value.len(), "Writing blob");

        sqlx::query(
            r#"
            INSERT INTO kv_store (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Deletes the value stored under `key`.
    ///
    /// ## Returns
    /// `true` if a value was removed.
    pub async fn delete(&self, key: &str) -> DbResult<bool> {
        debug!(key = %key, "Deleting blob");

        let result = sqlx::query("DELETE FROM kv_store WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_get_missing_key() {
        let db = test_db().await;
        assert_eq!(db.blobs().get("@RocketShoes:cart").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let db = test_db().await;
        let repo = db.blobs();

        repo.set("@RocketShoes:cart", r#"[{"id":1}]"#).await.unwrap();

        assert_eq!(
            repo.get("@RocketShoes:cart").await.unwrap().as_deref(),
            Some(r#"[{"id":1}]"#)
        );
    }

    #[tokio::test]
    async fn test_set_overwrites() {
        let db = test_db().await;
        let repo = db.blobs();

        repo.set("k", "first").await.unwrap();
        let first = repo.get_entry("k").await.unwrap().unwrap();

        repo.set("k", "second").await.unwrap();
        let second = repo.get_entry("k").await.unwrap().unwrap();

        assert_eq!(second.value, "second");
        assert!(second.updated_at >= first.updated_at);
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let db = test_db().await;
        let repo = db.blobs();

        repo.set("a", "1").await.unwrap();
        repo.set("b", "2").await.unwrap();

        assert_eq!(repo.get("a").await.unwrap().as_deref(), Some("1"));
        assert_eq!(repo.get("b").await.unwrap().as_deref(), Some("2"));
    }

    #[tokio::test]
    async fn test_delete() {
        let db = test_db().await;
        let repo = db.blobs();

        repo.set("k", "v").await.unwrap();

        assert!(repo.delete("k").await.unwrap());
        assert!(!repo.delete("k").await.unwrap());
        assert_eq!(repo.get("k").await.unwrap(), None);
    }
}
