//! # Domain Types
//!
//! Core domain types used throughout ShoeCart.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    LineItem     │   │   StockLevel    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │◄──│  product (flat) │   │  id             │       │
//! │  │  title          │   │  amount (≥ 1)   │   │  amount (≥ 0)   │       │
//! │  │  price          │   └────────┬────────┘   └─────────────────┘       │
//! │  │  image          │            │                                       │
//! │  └─────────────────┘   ┌────────▼────────┐   ┌─────────────────┐       │
//! │                        │      Cart       │──►│   CartTotals    │       │
//! │                        │  Vec<LineItem>  │   │  (derived)      │       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! A line item is the product's own fields plus `amount`:
//! `{"id":1,"title":"Shoe","price":179.9,"image":"shoe.jpg","amount":2}`.
//! A cart is a JSON array of those, in insertion order.

use std::fmt;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use ts_rs::TS;

use crate::error::{CartError, CoreResult};
use crate::money::{self, Money};

// =============================================================================
// Product Id
// =============================================================================

/// Catalog identifier of a product.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(transparent)]
#[ts(export)]
pub struct ProductId(u32);

impl ProductId {
    #[inline]
    pub const fn new(id: u32) -> Self {
        ProductId(id)
    }

    #[inline]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        ProductId(id)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Product
// =============================================================================

/// Product metadata as served by the catalog.
///
/// The cart never interprets these fields beyond the id; they are frozen into
/// the line item when the product is first added. Fields the catalog sends
/// beyond the four named ones ride along in `extra` and are stored with the
/// line item. The price is the one lossy field: it is kept in whole cents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    pub id: ProductId,

    /// Display name.
    pub title: String,

    /// Unit price; crosses JSON as a decimal number.
    #[serde(with = "money::decimal")]
    #[ts(type = "number")]
    pub price: Money,

    /// Image reference (URL).
    pub image: String,

    /// Catalog fields the cart does not name.
    #[serde(flatten)]
    #[ts(skip)]
    pub extra: Map<String, Value>,
}

impl Product {
    pub fn new(
        id: ProductId,
        title: impl Into<String>,
        price: Money,
        image: impl Into<String>,
    ) -> Self {
        Product {
            id,
            title: title.into(),
            price,
            image: image.into(),
            extra: Map::new(),
        }
    }
}

// =============================================================================
// Stock Level
// =============================================================================

/// Available quantity for a product, fetched per operation and never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StockLevel {
    #[serde(rename = "id")]
    pub product_id: ProductId,

    #[serde(rename = "amount")]
    pub available: u32,
}

impl StockLevel {
    pub const fn new(product_id: ProductId, available: u32) -> Self {
        StockLevel {
            product_id,
            available,
        }
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One product's entry in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItem {
    /// Product snapshot taken when the item was first added.
    #[serde(flatten)]
    pub product: Product,

    /// Quantity in cart (always ≥ 1 inside a valid cart).
    #[serde(rename = "amount")]
    pub quantity: u32,
}

impl LineItem {
    /// Creates a line item with quantity 1.
    ///
    /// A catalog field named `amount` is dropped; the cart quantity owns that
    /// key on the wire.
    pub fn new(mut product: Product) -> Self {
        product.extra.remove("amount");
        LineItem {
            product,
            quantity: 1,
        }
    }

    #[inline]
    pub fn product_id(&self) -> ProductId {
        self.product.id
    }

    /// Calculates the line total (unit price × quantity).
    pub fn line_total(&self) -> Money {
        self.product.price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// Violations of the cart's structural invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntegrityError {
    #[error("Duplicate line item for product {0}")]
    DuplicateProduct(ProductId),

    #[error("Line item for product {0} has zero quantity")]
    ZeroQuantity(ProductId),
}

/// The ordered collection of line items.
///
/// ## Invariants
/// - At most one line item per product id
/// - Every quantity is ≥ 1
/// - Order is insertion order; quantity changes keep an item in place
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Builds a cart from decoded items, checking every invariant.
    pub fn from_items(items: Vec<LineItem>) -> Result<Self, IntegrityError> {
        let mut cart = Cart::new();
        for item in items {
            cart.push_item(item)?;
        }
        Ok(cart)
    }

    /// Appends a new line item at the end of the cart.
    pub fn push_item(&mut self, item: LineItem) -> Result<(), IntegrityError> {
        if item.quantity == 0 {
            return Err(IntegrityError::ZeroQuantity(item.product_id()));
        }
        if self.contains(item.product_id()) {
            return Err(IntegrityError::DuplicateProduct(item.product_id()));
        }
        self.items.push(item);
        Ok(())
    }

    /// Sets the quantity of an existing line item, keeping its position.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: NonZeroU32) -> CoreResult<()> {
        let item = self
            .items
            .iter_mut()
            .find(|i| i.product_id() == product_id)
            .ok_or(CartError::ProductNotInCart(product_id))?;
        item.quantity = quantity.get();
        Ok(())
    }

    /// Removes a line item by product id.
    pub fn remove(&mut self, product_id: ProductId) -> CoreResult<LineItem> {
        let index = self
            .items
            .iter()
            .position(|i| i.product_id() == product_id)
            .ok_or(CartError::ProductNotInCart(product_id))?;
        Ok(self.items.remove(index))
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn get(&self, product_id: ProductId) -> Option<&LineItem> {
        self.items.iter().find(|i| i.product_id() == product_id)
    }

    pub fn contains(&self, product_id: ProductId) -> bool {
        self.get(product_id).is_some()
    }

    /// Returns the quantity held for a product, if it is in the cart.
    pub fn quantity_of(&self, product_id: ProductId) -> Option<u32> {
        self.get(product_id).map(|i| i.quantity)
    }

    /// Returns the number of unique products in the cart.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the total quantity of all items.
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Calculates the subtotal of every line.
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(LineItem::line_total).sum()
    }

    pub fn totals(&self) -> CartTotals {
        CartTotals::from(self)
    }
}

// =============================================================================
// Cart Totals
// =============================================================================

/// Cart totals summary for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartTotals {
    #[ts(type = "number")]
    pub item_count: usize,
    #[ts(type = "number")]
    pub total_quantity: u64,
    #[ts(type = "number")]
    pub subtotal_cents: i64,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            item_count: cart.len(),
            total_quantity: cart.total_quantity(),
            subtotal_cents: cart.subtotal().cents(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: u32, price_cents: i64) -> Product {
        Product::new(
            ProductId::new(id),
            format!("Product {}", id),
            Money::from_cents(price_cents),
            format!("https://cdn.example/{}.jpg", id),
        )
    }

    fn qty(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    #[test]
    fn test_push_and_totals() {
        let mut cart = Cart::new();
        cart.push_item(LineItem::new(product(1, 17990))).unwrap();
        cart.push_item(LineItem::new(product(2, 13990))).unwrap();
        cart.set_quantity(ProductId::new(2), qty(3)).unwrap();

        let totals = cart.totals();
        assert_eq!(totals.item_count, 2);
        assert_eq!(totals.total_quantity, 4);
        assert_eq!(totals.subtotal_cents, 17990 + 3 * 13990);
    }

    #[test]
    fn test_push_rejects_duplicates_and_zero_quantity() {
        let mut cart = Cart::new();
        cart.push_item(LineItem::new(product(1, 100))).unwrap();

        assert_eq!(
            cart.push_item(LineItem::new(product(1, 100))),
            Err(IntegrityError::DuplicateProduct(ProductId::new(1)))
        );

        let mut empty = LineItem::new(product(2, 100));
        empty.quantity = 0;
        assert_eq!(
            cart.push_item(empty),
            Err(IntegrityError::ZeroQuantity(ProductId::new(2)))
        );
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_set_quantity_keeps_position() {
        let mut cart = Cart::new();
        for id in 1..=3 {
            cart.push_item(LineItem::new(product(id, 100))).unwrap();
        }

        cart.set_quantity(ProductId::new(1), qty(4)).unwrap();

        let ids: Vec<u32> = cart.items().iter().map(|i| i.product_id().get()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(cart.quantity_of(ProductId::new(1)), Some(4));
    }

    #[test]
    fn test_missing_product_errors() {
        let mut cart = Cart::new();
        assert_eq!(
            cart.set_quantity(ProductId::new(9), qty(1)),
            Err(CartError::ProductNotInCart(ProductId::new(9)))
        );
        assert_eq!(
            cart.remove(ProductId::new(9)),
            Err(CartError::ProductNotInCart(ProductId::new(9)))
        );
    }

    #[test]
    fn test_line_item_wire_format_is_flat() {
        let mut item = LineItem::new(product(1, 17990));
        item.quantity = 2;

        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "id": 1,
                "title": "Product 1",
                "price": 179.9,
                "image": "https://cdn.example/1.jpg",
                "amount": 2
            })
        );
    }

    #[test]
    fn test_unknown_catalog_fields_are_kept() {
        let catalog = r#"{"id":5,"title":"Boot","price":99.5,"image":"b.jpg","brand":"Acme","sizes":[40,41],"amount":9}"#;
        let product: Product = serde_json::from_str(catalog).unwrap();
        assert_eq!(product.extra["brand"], "Acme");

        let item = LineItem::new(product);
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["brand"], "Acme");
        assert_eq!(value["sizes"], serde_json::json!([40, 41]));
        assert_eq!(value["amount"], 1);

        let stored: LineItem = serde_json::from_value(value).unwrap();
        assert_eq!(stored, item);
        assert!(!stored.product.extra.contains_key("amount"));
    }

    #[test]
    fn test_stock_level_wire_format() {
        let stock: StockLevel = serde_json::from_str(r#"{"id":4,"amount":7}"#).unwrap();
        assert_eq!(stock, StockLevel::new(ProductId::new(4), 7));
    }
}
