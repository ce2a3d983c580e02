//! # Collaborator Ports
//!
//! The four seams [`CartStore`](crate::CartStore) talks through. Each is an
//! object-safe async trait so the store holds them as `Arc<dyn ...>` and tests
//! swap in fakes.
//!
//! ```text
//!                    ┌──────────────┐
//!   ProductCatalog ◄─┤              ├─► PersistentStore
//!                    │  CartStore   │
//!   StockService   ◄─┤              ├─► NotificationSink
//!                    └──────────────┘
//! ```

use async_trait::async_trait;
use shoecart_core::{Product, ProductId, StockLevel};

use crate::error::{ClientResult, StorageResult};
use crate::notify::Notification;

/// Product metadata lookup.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// Returns `Ok(None)` when the catalog has no such product.
    async fn product(&self, id: ProductId) -> ClientResult<Option<Product>>;
}

/// Available-quantity lookup. Results are never cached by the store.
#[async_trait]
pub trait StockService: Send + Sync {
    /// Returns `Ok(None)` when the service has no record for the product.
    async fn stock(&self, id: ProductId) -> ClientResult<Option<StockLevel>>;
}

/// Durable string-keyed byte storage that survives restarts.
#[async_trait]
pub trait PersistentStore: Send + Sync {
    async fn load(&self, key: &str) -> StorageResult<Option<Vec<u8>>>;

    /// Replaces the slot. Must not return before the bytes are durable.
    async fn save(&self, key: &str, bytes: &[u8]) -> StorageResult<()>;
}

/// Fire-and-forget user-facing messages.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: Notification);
}
