//! # Cart Codec
//!
//! Converts a [`Cart`] to and from the bytes kept in the storage slot.
//!
//! ## Format
//! A JSON array of flat line items, in cart order:
//! ```json
//! [
//!   {"id":1,"title":"Shoe","price":179.9,"image":"shoe.jpg","amount":2},
//!   {"id":3,"title":"Sneaker","price":139.9,"image":"sneaker.jpg","amount":1}
//! ]
//! ```
//!
//! Decoding re-checks the cart invariants, so a hand-edited or truncated slot
//! surfaces as a [`CodecError`] instead of a cart with duplicate products.

use crate::error::{CartError, CodecError, CoreResult};
use crate::types::{Cart, LineItem};

/// Serializes a cart for storage.
pub fn encode(cart: &Cart) -> CoreResult<Vec<u8>> {
    serde_json::to_vec(cart).map_err(|e| CartError::Internal(e.to_string()))
}

/// Deserializes and validates a stored cart.
pub fn decode(bytes: &[u8]) -> Result<Cart, CodecError> {
    let items: Vec<LineItem> = serde_json::from_slice(bytes)?;
    Ok(Cart::from_items(items)?)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::{IntegrityError, Product, ProductId};
    use std::num::NonZeroU32;

    fn shoe(id: u32) -> Product {
        Product::new(ProductId::new(id), "Shoe", Money::from_cents(17990), "shoe.jpg")
    }

    #[test]
    fn test_round_trip_preserves_order_and_quantities() {
        let mut cart = Cart::new();
        cart.push_item(LineItem::new(shoe(3))).unwrap();
        cart.push_item(LineItem::new(shoe(1))).unwrap();
        cart.set_quantity(ProductId::new(3), NonZeroU32::new(4).unwrap())
            .unwrap();

        let bytes = encode(&cart).unwrap();
        assert_eq!(decode(&bytes).unwrap(), cart);
    }

    #[test]
    fn test_decodes_storefront_payload() {
        let stored = br#"[{"id":1,"title":"Tenis de Caminhada","price":179.9,"image":"https://x/1.jpg","amount":2}]"#;
        let cart = decode(stored).unwrap();

        assert_eq!(cart.quantity_of(ProductId::new(1)), Some(2));
        assert_eq!(cart.subtotal().cents(), 35980);
    }

    #[test]
    fn test_empty_array_is_empty_cart() {
        assert!(decode(b"[]").unwrap().is_empty());
        assert_eq!(encode(&Cart::new()).unwrap(), b"[]");
    }

    #[test]
    fn test_malformed_bytes() {
        assert!(matches!(decode(b"{not json"), Err(CodecError::Malformed(_))));
        assert!(matches!(decode(b"null"), Err(CodecError::Malformed(_))));
        assert!(matches!(
            decode(br#"[{"id":1,"amount":1}]"#),
            Err(CodecError::Malformed(_))
        ));
    }

    #[test]
    fn test_invariant_violations() {
        let duplicate = br#"[
            {"id":1,"title":"a","price":1,"image":"","amount":1},
            {"id":1,"title":"a","price":1,"image":"","amount":2}
        ]"#;
        assert!(matches!(
            decode(duplicate),
            Err(CodecError::Integrity(IntegrityError::DuplicateProduct(_)))
        ));

        let zero = br#"[{"id":2,"title":"a","price":1,"image":"","amount":0}]"#;
        assert!(matches!(
            decode(zero),
            Err(CodecError::Integrity(IntegrityError::ZeroQuantity(_)))
        ));
    }
}
