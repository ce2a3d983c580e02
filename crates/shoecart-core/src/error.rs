//! # Error Types
//!
//! Domain-specific error types for shoecart-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  shoecart-core errors (this file)                                      │
//! │  ├── CartError   - Outcome of a failed cart operation                  │
//! │  └── CodecError  - Stored cart bytes could not be decoded              │
//! │                                                                         │
//! │  shoecart-db errors (separate crate)                                   │
//! │  └── DbError     - Database operation failures                         │
//! │                                                                         │
//! │  shoecart-store errors (separate crate)                                │
//! │  ├── ClientError - Catalog/stock transport failures                    │
//! │  └── StoreError  - Opening the store                                   │
//! │                                                                         │
//! │  Flow: DbError / ClientError → CartError → caller + notification       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::types::{IntegrityError, ProductId};

// =============================================================================
// Cart Error
// =============================================================================

/// Reasons a cart operation can fail.
///
/// Every variant leaves the cart and its persisted copy exactly as they were
/// before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// The catalog does not know the product.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// The stock service has no record for the product.
    #[error("No stock record for product {0}")]
    StockNotFound(ProductId),

    /// The operation targets a product that has no line item.
    #[error("Product {0} is not in the cart")]
    ProductNotInCart(ProductId),

    /// Incrementing a line item would exceed available stock.
    ///
    /// ## User Workflow
    /// ```text
    /// Add to Cart (already holding 5)
    ///      │
    ///      ▼
    /// Check stock: available=5
    ///      │
    ///      ▼
    /// OutOfStock { product_id: 1, available: 5, requested: 6 }
    ///      │
    ///      ▼
    /// UI shows: "requested quantity out of stock"
    /// ```
    #[error("Out of stock for product {product_id}: available {available}, requested {requested}")]
    OutOfStock {
        product_id: ProductId,
        available: u32,
        requested: u32,
    },

    /// An explicit quantity is below one or above available stock.
    #[error("Invalid quantity {requested} for product {product_id}: available {available}")]
    InvalidQuantity {
        product_id: ProductId,
        requested: i64,
        available: u32,
    },

    /// The catalog or stock service could not be reached or answered garbage.
    #[error("Transport failure: {0}")]
    TransportFailure(String),

    /// The new cart could not be written to durable storage.
    #[error("Persistence failure: {0}")]
    Persistence(String),

    /// A mutation would have broken a cart invariant.
    #[error("Cart integrity violation: {0}")]
    Integrity(#[from] IntegrityError),

    /// The cart could not be serialized.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CartError {
    /// Returns true if the failure came from the stock ceiling.
    pub fn is_stock_error(&self) -> bool {
        matches!(
            self,
            CartError::OutOfStock { .. } | CartError::InvalidQuantity { .. }
        )
    }
}

// =============================================================================
// Codec Error
// =============================================================================

/// Errors decoding a persisted cart.
///
/// The store treats all of these as "no stored cart".
#[derive(Debug, Error)]
pub enum CodecError {
    /// Bytes are not a JSON array of line items.
    #[error("Malformed cart payload: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Items decoded but break a cart invariant.
    #[error("Corrupt cart: {0}")]
    Integrity(#[from] IntegrityError),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CartError.
pub type CoreResult<T> = Result<T, CartError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CartError::OutOfStock {
            product_id: ProductId::new(3),
            available: 3,
            requested: 4,
        };
        assert_eq!(
            err.to_string(),
            "Out of stock for product 3: available 3, requested 4"
        );

        let err = CartError::ProductNotInCart(ProductId::new(7));
        assert_eq!(err.to_string(), "Product 7 is not in the cart");

        let err = CartError::from(IntegrityError::DuplicateProduct(ProductId::new(2)));
        assert_eq!(
            err.to_string(),
            "Cart integrity violation: Duplicate line item for product 2"
        );
    }

    #[test]
    fn test_stock_error_classification() {
        assert!(CartError::InvalidQuantity {
            product_id: ProductId::new(1),
            requested: 0,
            available: 5,
        }
        .is_stock_error());
        assert!(!CartError::ProductNotFound(ProductId::new(1)).is_stock_error());
        assert!(!CartError::TransportFailure("timeout".into()).is_stock_error());
        assert!(!CartError::StockNotFound(ProductId::new(1)).is_stock_error());
    }
}
