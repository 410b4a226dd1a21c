//! # Error Types
//!
//! Domain-specific error types for cart-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  cart-core errors (this file)                                          │
//! │  └── CoreError        - Cart rule violations                           │
//! │                                                                         │
//! │  cart-db errors (separate crate)                                       │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  cart-store errors                                                     │
//! │  ├── CatalogError     - Product/stock lookups                          │
//! │  ├── StorageError     - Blob store reads/writes                        │
//! │  └── CartError        - Everything above, mapped to a Notice           │
//! │                                                                         │
//! │  Flow: CoreError → CartError → Notice → user                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::types::ProductId;

/// Cart rule violations.
///
/// Returned by the pure transitions on [`Cart`](crate::Cart). The store turns
/// them into user-facing notices.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The requested quantity is larger than what the catalog has in stock.
    ///
    /// ## User Workflow
    /// ```text
    /// Add to cart (already 3 in cart)
    ///      │
    ///      ▼
    /// Check stock: available=3
    ///      │
    ///      ▼
    /// InsufficientStock { product_id: 7, available: 3, requested: 4 }
    ///      │
    ///      ▼
    /// UI shows: "Requested quantity is out of stock"
    /// ```
    #[error("Insufficient stock for product {product_id}: available {available}, requested {requested}")]
    InsufficientStock {
        product_id: ProductId,
        available: u32,
        requested: u32,
    },

    /// The product has no line in the cart.
    #[error("Product {0} is not in the cart")]
    NotInCart(ProductId),
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
