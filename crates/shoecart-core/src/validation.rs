//! # Validation Module
//!
//! Stock ceiling rules for ShoeCart.
//!
//! ## Where Each Rule Applies
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Stock Ceiling Rules                                │
//! │                                                                         │
//! │  add_product (already in cart)                                         │
//! │  └── check_increment:  current + 1 ≤ available    else OutOfStock      │
//! │                                                                         │
//! │  add_product (first add, policy switch on)                             │
//! │  └── check_increment with current = 0                                  │
//! │                                                                         │
//! │  update_product_amount                                                 │
//! │  └── validate_amount:  1 ≤ amount ≤ available     else InvalidQuantity │
//! │                                                                         │
//! │  remove_product                                                        │
//! │  └── (no stock rule)                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both rules return the new quantity as a `NonZeroU32` so the cart can never
//! be handed a zero.

use std::num::NonZeroU32;

use crate::error::{CartError, CoreResult};
use crate::types::StockLevel;

/// Checks that one more unit fits under the stock ceiling.
///
/// ## Example
/// ```rust
/// use shoecart_core::validation::check_increment;
/// use shoecart_core::{ProductId, StockLevel};
///
/// let stock = StockLevel::new(ProductId::new(1), 5);
/// assert_eq!(check_increment(4, &stock).unwrap().get(), 5);
/// assert!(check_increment(5, &stock).is_err());
/// ```
pub fn check_increment(current: u32, stock: &StockLevel) -> CoreResult<NonZeroU32> {
    match NonZeroU32::MIN.checked_add(current) {
        Some(requested) if requested.get() <= stock.available => Ok(requested),
        _ => Err(CartError::OutOfStock {
            product_id: stock.product_id,
            available: stock.available,
            requested: current.saturating_add(1),
        }),
    }
}

/// Validates an explicit quantity against the stock ceiling.
///
/// ## Rules
/// - Must be at least 1
/// - Must not exceed available stock
///
/// ## Example
/// ```rust
/// use shoecart_core::validation::validate_amount;
/// use shoecart_core::{ProductId, StockLevel};
///
/// let stock = StockLevel::new(ProductId::new(1), 5);
/// assert_eq!(validate_amount(5, &stock).unwrap().get(), 5);
/// assert!(validate_amount(0, &stock).is_err());
/// assert!(validate_amount(6, &stock).is_err());
/// ```
pub fn validate_amount(amount: i64, stock: &StockLevel) -> CoreResult<NonZeroU32> {
    let invalid = || CartError::InvalidQuantity {
        product_id: stock.product_id,
        requested: amount,
        available: stock.available,
    };

    let quantity = u32::try_from(amount)
        .ok()
        .and_then(NonZeroU32::new)
        .ok_or_else(invalid)?;

    if quantity.get() > stock.available {
        return Err(invalid());
    }

    Ok(quantity)
}

// =============================================================================
// Unit Tests
// =============================================================================
