//! # shoecart-core: Pure Cart Rules for ShoeCart
//!
//! This crate is the **heart** of ShoeCart. It contains the cart model and
//! every consistency rule as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        ShoeCart Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Storefront UI / shoecart CLI                    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │         shoecart-store (CartStore, catalog, stock, sinks)       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ shoecart-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   codec   │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │  Cart ⇄   │  │  stock    │  │   │
//! │  │   │  Cart     │  │ (cents)   │  │  JSON     │  │  ceilings │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, LineItem, Cart, StockLevel)
//! - [`money`] - Money type with integer arithmetic
//! - [`error`] - Cart error taxonomy
//! - [`validation`] - Stock ceiling and quantity rules
//! - [`codec`] - Persisted cart format
//!
//! ## Example Usage
//!
//! ```rust
//! use shoecart_core::{Cart, LineItem, Money, Product, ProductId};
//!
//! let shoe = Product::new(ProductId::new(1), "Shoe", Money::from_cents(17990), "shoe.jpg");
//!
//! let mut cart = Cart::new();
//! cart.push_item(LineItem::new(shoe)).unwrap();
//!
//! assert_eq!(cart.quantity_of(ProductId::new(1)), Some(1));
//! assert_eq!(cart.subtotal().cents(), 17990);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod codec;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CartError, CodecError, CoreResult};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Well-known storage slot the storefront keeps its cart under.
///
/// Existing browser sessions already hold carts under this key, so the
/// default must not change.
pub const CART_STORAGE_KEY: &str = "@RocketShoes:cart";
