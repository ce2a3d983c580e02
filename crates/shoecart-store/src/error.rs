//! # Store Error Types
//!
//! ## Error Flow
//! ```text
//! reqwest / serde_json ──► ClientError  ─┐
//!                                        ├──► CartError (per operation) ──► Notification
//! DbError / backend    ──► StorageError ─┘
//!
//! toml / io / url      ──► ConfigError  (loading configuration)
//!
//! StorageError         ──► StoreError   (opening the store)
//! ```
//!
//! Operation failures always surface as [`CartError`] so callers match on a
//! single taxonomy; the richer layer errors only survive in log lines.

use shoecart_core::CartError;
use shoecart_db::DbError;
use thiserror::Error;

// =============================================================================
// Client Error
// =============================================================================

/// Failures talking to the product catalog or stock service.
///
/// "Not found" is not an error here; lookups return `Ok(None)` for it.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection refused, DNS failure, timeout, or body read failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status other than 404.
    #[error("Unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    /// The response body was not the expected JSON shape.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configured base URL cannot carry path segments.
    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),
}

/// Result type for catalog and stock lookups.
pub type ClientResult<T> = Result<T, ClientError>;

impl From<ClientError> for CartError {
    fn from(err: ClientError) -> Self {
        CartError::TransportFailure(err.to_string())
    }
}

// =============================================================================
// Storage Error
// =============================================================================

/// Failures reading or writing the durable cart slot.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] DbError),

    /// Any other backend refused the read or write.
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Result type for persistent store operations.
pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for CartError {
    fn from(err: StorageError) -> Self {
        CartError::Persistence(err.to_string())
    }
}

// =============================================================================
// Config Error
// =============================================================================

/// Configuration loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("No config path available")]
    NoConfigPath,
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Store Error
// =============================================================================

/// Errors opening a [`CartStore`](crate::CartStore).
#[derive(Debug, Error)]
pub enum StoreError {
    /// The persisted cart could not be read at all (not merely malformed).
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Result type for store setup.
pub type StoreResult<T> = Result<T, StoreError>;
