//! # Persistence Adapters
//!
//! [`PersistentStore`] implementations:
//!
//! - [`SqliteStore`] - the `storage` table in the local SQLite database
//! - [`MemoryStore`] - a process-local map for tests and throwaway sessions

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use shoecart_db::Database;

use crate::error::{StorageError, StorageResult};
use crate::ports::PersistentStore;

// =============================================================================
// SQLite
// =============================================================================

/// Cart slot persisted through `shoecart-db`.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    db: Database,
}

impl SqliteStore {
    pub fn new(db: Database) -> Self {
        SqliteStore { db }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

#[async_trait]
impl PersistentStore for SqliteStore {
    async fn load(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
        Ok(self.db.storage().get(key).await?)
    }

    async fn save(&self, key: &str, bytes: &[u8]) -> StorageResult<()> {
        Ok(self.db.storage().put(key, bytes).await?)
    }
}

// =============================================================================
// In-Memory
// =============================================================================

/// Process-local slots. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slots: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a slot, e.g. with bytes written by an earlier session.
    pub fn with_slot(self, key: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        if let Ok(mut slots) = self.slots.lock() {
            slots.insert(key.into(), bytes.into());
        }
        self
    }

    /// Returns a copy of a slot's current bytes.
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.slots.lock().ok()?.get(key).cloned()
    }
}

#[async_trait]
impl PersistentStore for MemoryStore {
    async fn load(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
        let slots = self
            .slots
            .lock()
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        Ok(slots.get(key).cloned())
    }

    async fn save(&self, key: &str, bytes: &[u8]) -> StorageResult<()> {
        let mut slots = self
            .slots
            .lock()
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        slots.insert(key.to_string(), bytes.to_vec());
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
