//! # cart-core: Pure Cart Rules for the Storefront
//!
//! This crate holds the cart rules as pure functions with zero I/O
//! dependencies. Fetching products, checking stock and persisting the cart
//! all happen in `cart-store`; this crate only decides what the next cart
//! looks like.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Storefront Cart Architecture                       │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   cart-cli / storefront UI                      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │          cart-store (CartStore, Catalog, BlobStore)             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ cart-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐                  │   │
//! │  │   │   types   │  │   cart    │  │   error   │                  │   │
//! │  │   │  Product  │  │   Cart    │  │ CoreError │                  │   │
//! │  │   │   Stock   │  │  Totals   │  │           │                  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘                  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Catalog records (Product, Stock) and cart line items
//! - [`cart`] - The cart and its immutable transitions
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use cart_core::{Cart, Product, Stock};
//! use rust_decimal::Decimal;
//!
//! let product = Product {
//!     id: 1,
//!     title: "Running shoe".to_string(),
//!     price: Decimal::new(17990, 2),
//!     image: "https://example.com/shoe.jpg".to_string(),
//!     extra: Default::default(),
//! };
//! let stock = Stock { id: 1, amount: 3 };
//!
//! let cart = Cart::new().with_product_added(&product, &stock).unwrap();
//! assert_eq!(cart.amount_of(1), Some(1));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartTotals};
pub use error::{CoreError, CoreResult};
pub use types::*;
