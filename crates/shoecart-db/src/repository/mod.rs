//! # Repository Module
//!
//! Database repositories for ShoeCart. Each repository owns the SQL for one
//! table and hands out plain Rust values.
//!
//! ## Available Repositories
//!
//! - [`storage::StorageRepository`] - string-keyed byte slots (the cart slot lives here)

pub mod storage;
