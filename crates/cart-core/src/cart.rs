//! # Cart
//!
//! The shopping cart and its transitions.
//!
//! ## Immutable Transitions
//! Every transition borrows the current cart and returns a brand new one.
//! A cart that has been handed out as a snapshot is never touched again.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Transitions                                     │
//! │                                                                         │
//! │  Store Operation          Transition                  Result            │
//! │  ───────────────          ──────────                  ──────            │
//! │                                                                         │
//! │  add_product ───────────► with_product_added() ────► +1 or append      │
//! │                                                                         │
//! │  update_product_amount ─► with_amount() ───────────► line.amount = n   │
//! │                                                                         │
//! │  remove_product ────────► without_product() ───────► line dropped      │
//! │                                                                         │
//! │  cart() ────────────────► (read only)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::types::{CartItem, Product, ProductId, Stock};

/// The shopping cart.
///
/// ## Invariants
/// - At most one line per product id
/// - Lines keep insertion order; updates happen in place
///
/// Serializes as a bare JSON array of lines, which is the persisted blob
/// format. Deserializing drops repeated ids, keeping the first line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<CartItem>", into = "Vec<CartItem>")]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Lines in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Looks up the line for a product.
    pub fn get(&self, product_id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|i| i.id == product_id)
    }

    /// Quantity of a product held in the cart, if present.
    pub fn amount_of(&self, product_id: ProductId) -> Option<u32> {
        self.get(product_id).map(|i| i.amount)
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct products in the cart.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Sum of all line amounts.
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.amount)).sum()
    }

    /// Sum of all line subtotals.
    pub fn total(&self) -> Decimal {
        self.items.iter().map(CartItem::subtotal).sum()
    }

    /// Amount held per product, for catalog listings.
    pub fn amounts_by_product(&self) -> BTreeMap<ProductId, u32> {
        self.items.iter().map(|i| (i.id, i.amount)).collect()
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Adds one unit of `product`.
    ///
    /// ## Behavior
    /// - Product already in cart: its amount goes up by one, same position
    /// - Product not in cart: appended with amount 1
    ///
    /// ## Errors
    /// [`CoreError::InsufficientStock`] when the new amount would exceed
    /// `stock.amount`.
    pub fn with_product_added(&self, product: &Product, stock: &Stock) -> CoreResult<Cart> {
        let current = self.amount_of(product.id).unwrap_or(0);

        // A line already at u32::MAX can never take another unit.
        let Some(desired) = current.checked_add(1).filter(|d| stock.covers(*d)) else {
            return Err(CoreError::InsufficientStock {
                product_id: product.id,
                available: stock.amount,
                requested: current.saturating_add(1),
            });
        };

        if self.get(product.id).is_none() {
            let mut items = self.items.clone();
            items.push(CartItem::from_product(product, 1));
            return Ok(Cart { items });
        }

        Ok(self.replace_amount(product.id, desired))
    }

    /// Sets the amount held for a product already in the cart.
    ///
    /// ## Errors
    /// - [`CoreError::NotInCart`] if the product has no line
    /// - [`CoreError::InsufficientStock`] if `amount` exceeds `stock.amount`
    pub fn with_amount(
        &self,
        product_id: ProductId,
        amount: u32,
        stock: &Stock,
    ) -> CoreResult<Cart> {
        if self.get(product_id).is_none() {
            return Err(CoreError::NotInCart(product_id));
        }

        if !stock.covers(amount) {
            return Err(CoreError::InsufficientStock {
                product_id,
                available: stock.amount,
                requested: amount,
            });
        }

        Ok(self.replace_amount(product_id, amount))
    }

    /// Removes a product's line, keeping the order of the others.
    ///
    /// ## Errors
    /// [`CoreError::NotInCart`] if the product has no line.
    pub fn without_product(&self, product_id: ProductId) -> CoreResult<Cart> {
        if self.get(product_id).is_none() {
            return Err(CoreError::NotInCart(product_id));
        }

        let items = self
            .items
            .iter()
            .filter(|i| i.id != product_id)
            .cloned()
            .collect();

        Ok(Cart { items })
    }

    fn replace_amount(&self, product_id: ProductId, amount: u32) -> Cart {
        let items = self
            .items
            .iter()
            .map(|i| {
                if i.id == product_id {
                    i.with_amount(amount)
                } else {
                    i.clone()
                }
            })
            .collect();

        Cart { items }
    }
}

impl FromIterator<CartItem> for Cart {
    /// Builds a cart from lines, keeping the first line seen for each id.
    fn from_iter<T: IntoIterator<Item = CartItem>>(iter: T) -> Self {
        let mut items: Vec<CartItem> = Vec::new();
        for item in iter {
            if !items.iter().any(|i| i.id == item.id) {
                items.push(item);
            }
        }
        Cart { items }
    }
}

impl From<Vec<CartItem>> for Cart {
    fn from(items: Vec<CartItem>) -> Self {
        items.into_iter().collect()
    }
}

impl From<Cart> for Vec<CartItem> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}

/// Cart totals summary for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartTotals {
    pub item_count: usize,
    pub total_quantity: u64,
    #[serde(with = "rust_decimal::serde::float")]
    #[ts(type = "number")]
    pub total: Decimal,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            item_count: cart.item_count(),
            total_quantity: cart.total_quantity(),
            total: cart.total(),
        }
    }
}
