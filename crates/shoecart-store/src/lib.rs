//! # shoecart-store: Cart Runtime for ShoeCart
//!
//! Holds the live cart and coordinates the collaborators every mutation
//! depends on.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         shoecart-store                                  │
//! │                                                                         │
//! │   ┌──────────────┐        ┌─────────────────────────────────────────┐  │
//! │   │  config.rs   │──────► │              store.rs                   │  │
//! │   │ ShoeCartConfig│       │  CartStore  (Mutex<Cart> + watch)       │  │
//! │   └──────────────┘        └───┬─────────────┬──────────────┬────────┘  │
//! │                               │ ports.rs    │              │           │
//! │                ┌──────────────▼──┐   ┌──────▼───────┐  ┌───▼────────┐  │
//! │                │   remote.rs     │   │persistence.rs│  │ notify.rs  │  │
//! │                │  HttpCatalog    │   │ SqliteStore  │  │ LogNotifier│  │
//! │                │  (reqwest)      │   │ MemoryStore  │  │ Channel…   │  │
//! │                └─────────────────┘   └──────────────┘  └────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,ignore
//! use std::sync::Arc;
//! use shoecart_store::{CartStore, HttpCatalog, LogNotifier, ShoeCartConfig, SqliteStore};
//!
//! let config = ShoeCartConfig::load(None)?;
//! let catalog = Arc::new(HttpCatalog::from_config(&config.api)?);
//! let store = CartStore::builder(catalog.clone(), catalog)
//!     .storage(Arc::new(SqliteStore::new(db)))
//!     .policy(config.policy())
//!     .open()
//!     .await?;
//!
//! let snapshot = store.add_product(ProductId::new(1)).await?;
//! ```

pub mod config;
pub mod error;
pub mod notify;
pub mod persistence;
pub mod ports;
pub mod remote;
pub mod store;

pub use config::ShoeCartConfig;
pub use error::{
    ClientError, ClientResult, ConfigError, ConfigResult, StorageError, StorageResult, StoreError,
    StoreResult,
};
pub use notify::{ChannelNotifier, LogNotifier, Notification, Operation};
pub use persistence::{MemoryStore, SqliteStore};
pub use ports::{NotificationSink, PersistentStore, ProductCatalog, StockService};
pub use remote::HttpCatalog;
pub use store::{CartPolicy, CartSnapshot, CartStore, CartStoreBuilder};
