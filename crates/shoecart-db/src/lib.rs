//! # shoecart-db: Durable Storage for ShoeCart
//!
//! This crate provides database access for ShoeCart. It uses SQLite for local
//! storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        ShoeCart Data Flow                               │
//! │                                                                         │
//! │  CartStore (shoecart-store) ── SqliteStore adapter                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    shoecart-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │◄───│ (storage.rs)  │    │  (embedded)  │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite file, e.g. ~/.local/share/shoecart/shoecart.db                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use shoecart_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/shoecart.db")).await?;
//! db.storage().put("@RocketShoes:cart", b"[]").await?;
//! let bytes = db.storage().get("@RocketShoes:cart").await?;
//! ```

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::storage::StorageRepository;
