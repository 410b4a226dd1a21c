//! # Domain Types
//!
//! Records exchanged with the catalog and the line items held in the cart.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │     Stock       │   │    CartItem     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  id             │       │
//! │  │  title          │   │  amount (max)   │   │  title, price   │       │
//! │  │  price          │   └─────────────────┘   │  image          │       │
//! │  │  image          │                         │  amount (held)  │       │
//! │  └─────────────────┘                         └─────────────────┘       │
//! │        catalog                catalog                 cart             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Any other fields the catalog sends are kept in `extra` and travel with the
//! line into the persisted cart.
//!
//! `amount` means two different things: on [`Stock`] it is the most the
//! catalog can sell, on [`CartItem`] it is how many the shopper holds.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use ts_rs::TS;

/// Catalog identifier of a product.
pub type ProductId = u64;

// =============================================================================
// Product
// =============================================================================

/// A product as returned by `GET products/{id}`.
///
/// Display attributes are opaque to the cart; they are copied into the
/// cart line when the product is first added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    pub id: ProductId,

    pub title: String,

    /// Unit price. Serialized as a JSON number.
    #[serde(with = "rust_decimal::serde::float")]
    #[ts(type = "number")]
    pub price: Decimal,

    /// Image URL.
    pub image: String,

    /// Remaining catalog fields, passed through untouched.
    #[serde(flatten)]
    #[ts(skip)]
    pub extra: Map<String, Value>,
}

// =============================================================================
// Stock
// =============================================================================

/// Available quantity as returned by `GET stock/{id}`.
///
/// Fetched on demand and never cached; only valid at query time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Stock {
    pub id: ProductId,

    /// Maximum quantity that can be held in the cart.
    pub amount: u32,
}

impl Stock {
    /// Checks whether `requested` units can be held.
    #[inline]
    pub const fn covers(&self, requested: u32) -> bool {
        requested <= self.amount
    }
}

// =============================================================================
// Cart Item
// =============================================================================

/// A line in the cart.
///
/// ## Design Notes
/// The display attributes are a frozen copy of the product at the time it
/// was added, so the cart renders the same even if the catalog changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartItem {
    pub id: ProductId,

    pub title: String,

    #[serde(with = "rust_decimal::serde::float")]
    #[ts(type = "number")]
    pub price: Decimal,

    pub image: String,

    /// Quantity held in the cart.
    pub amount: u32,

    #[serde(flatten)]
    #[ts(skip)]
    pub extra: Map<String, Value>,
}

impl CartItem {
    /// Creates a cart line from a catalog product.
    pub fn from_product(product: &Product, amount: u32) -> Self {
        CartItem {
            id: product.id,
            title: product.title.clone(),
            price: product.price,
            image: product.image.clone(),
            amount,
            extra: product.extra.clone(),
        }
    }

    /// Line subtotal (unit price × amount).
    pub fn subtotal(&self) -> Decimal {
        self.price * Decimal::from(self.amount)
    }

    /// Returns a copy of this line holding `amount` units.
    pub(crate) fn with_amount(&self, amount: u32) -> Self {
        CartItem {
            amount,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sneaker() -> Product {
        Product {
            id: 1,
            title: "Tênis de Caminhada Leve Confortável".to_string(),
            price: Decimal::new(17990, 2),
            image: "https://cdn.example.com/sneaker-1.jpg".to_string(),
            extra: Map::new(),
        }
    }

    #[test]
    fn test_cart_item_copies_product() {
        let item = CartItem::from_product(&sneaker(), 2);

        assert_eq!(item.id, 1);
        assert_eq!(item.title, "Tênis de Caminhada Leve Confortável");
        assert_eq!(item.amount, 2);
    }

    #[test]
    fn test_subtotal() {
        let item = CartItem::from_product(&sneaker(), 3);
        assert_eq!(item.subtotal(), Decimal::new(53970, 2)); // 539.70
    }

    #[test]
    fn test_stock_covers() {
        let stock = Stock { id: 1, amount: 3 };
        assert!(stock.covers(3));
        assert!(!stock.covers(4));
        assert!(Stock { id: 1, amount: 0 }.covers(0));
    }

    #[test]
    fn test_product_reads_catalog_json() {
        let json = r#"{
            "id": 2,
            "title": "Tênis VR Caminhada Confortável Detalhes Couro Masculino",
            "price": 139.9,
            "image": "https://cdn.example.com/sneaker-2.jpg"
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, 2);
        assert_eq!(product.price, Decimal::new(1399, 1));
    }

    #[test]
    fn test_unknown_catalog_fields_survive_into_the_cart() {
        let json = r#"{
            "id": 3,
            "title": "Tênis Adidas Duramo Lite 2.0",
            "price": 219.9,
            "image": "https://cdn.example.com/sneaker-3.jpg",
            "brand": "Adidas",
            "sizes": [39, 40, 41]
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.extra["brand"], "Adidas");

        let item = CartItem::from_product(&product, 1);
        let stored = serde_json::to_value(&item).unwrap();
        assert_eq!(stored["brand"], "Adidas");
        assert_eq!(stored["sizes"][2], 41);
        assert_eq!(stored["amount"], 1);

        let reloaded: CartItem = serde_json::from_value(stored).unwrap();
        assert_eq!(reloaded, item);
        assert!(!reloaded.extra.contains_key("amount"));
    }

    #[test]
    fn test_stock_rejects_negative_amount() {
        let result = serde_json::from_str::<Stock>(r#"{ "id": 1, "amount": -1 }"#);
        assert!(result.is_err());
    }
}
