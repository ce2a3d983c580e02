//! # Storage Repository
//!
//! String-keyed durable slots backed by the `storage` table.
//!
//! ## Contract
//! ```text
//! put(key, bytes)  ──► INSERT ... ON CONFLICT(key) DO UPDATE   (atomic replace)
//! get(key)         ──► Some(bytes) | None when never written
//! delete(key)      ──► true if a row was removed
//! ```
//!
//! The repository never interprets slot contents; decoding and validation
//! belong to the caller.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;

/// Repository for key/value slots.
#[derive(Debug, Clone)]
pub struct StorageRepository {
    pool: SqlitePool,
}

impl StorageRepository {
    /// Creates a new storage repository.
    pub fn new(pool: SqlitePool) -> Self {
        StorageRepository { pool }
    }

    /// Reads the bytes stored under `key`.
    pub async fn get(&self, key: &str) -> DbResult<Option<Vec<u8>>> {
        let value: Option<Vec<u8>> =
            sqlx::query_scalar("SELECT value FROM storage WHERE key = ?1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;

        debug!(key, found = value.is_some(), "Storage slot read");
        Ok(value)
    }

    /// Replaces the bytes stored under `key`.
    ///
    /// A single upsert statement, so a concurrent reader sees either the
    /// previous value or the new one.
    pub async fn put(&self, key: &str, value: &[u8]) -> DbResult<()> {
        sqlx::query(
            r#"
            INSERT INTO storage (key, value, updated_at)
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

        debug!(key, bytes = value.len(), "Storage slot written");
        Ok(())
    }

    /// Removes the slot under `key`.
    pub async fn delete(&self, key: &str) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM storage WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
