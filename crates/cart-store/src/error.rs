//! # Error Types
//!
//! Errors raised while running a cart operation, and the notices the
//! shopper sees instead of them.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Cart Store                         │
//! │                                                                         │
//! │  CatalogError ──┐                                                       │
//! │  StorageError ──┼──► CartError ──► notice_for(operation) ──► Notifier   │
//! │  CoreError ─────┤                                                       │
//! │  serde_json ────┘                                                       │
//! │                                                                         │
//! │  The caller never sees a CartError. One catch site per operation       │
//! │  picks the Notice; the full error is logged.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Notice Mapping
//! | Operation       | Error                         | Notice          |
//! |-----------------|-------------------------------|-----------------|
//! | add             | insufficient stock            | StockExceeded   |
//! | add             | anything else                 | AddFailed       |
//! | remove          | anything                      | RemoveFailed    |
//! | update amount   | product not in cart           | UpdateFailed    |
//! | update amount   | anything else                 | StockExceeded   |

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use cart_core::{CoreError, ProductId};
use cart_db::DbError;

// =============================================================================
// Collaborator Errors
// =============================================================================

/// Errors from catalog lookups.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed (connection refused, reset, TLS...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The catalog has no such record.
    #[error("{resource} {id} not found")]
    NotFound {
        resource: &'static str,
        id: ProductId,
    },

    /// Any other non-2xx response.
    #[error("Catalog returned {status} for {url}")]
    Status { status: u16, url: String },

    /// Response body didn't match the expected record.
    #[error("Failed to parse response: {0}")]
    Decode(String),

    /// Base URL is unusable.
    #[error("Invalid catalog URL: {0}")]
    InvalidUrl(String),
}

/// Errors from the blob store.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error(transparent)]
    Db(#[from] DbError),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

// =============================================================================
// Cart Error
// =============================================================================

/// Everything that can stop a cart operation.
#[derive(Debug, Error)]
pub enum CartError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Catalog request failed: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Cart storage failed: {0}")]
    Storage(#[from] StorageError),

    #[error("Failed to encode cart: {0}")]
    Encode(#[from] serde_json::Error),
}

/// The cart operation an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Remove,
    UpdateAmount,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::Add => "add_product",
            Operation::Remove => "remove_product",
            Operation::UpdateAmount => "update_product_amount",
        })
    }
}

impl CartError {
    /// Picks the notice shown to the shopper when `operation` fails with
    /// this error.
    ///
    /// Failures while updating an amount report [`Notice::StockExceeded`]
    /// even when the stock lookup itself failed; only a missing cart line
    /// gets its own message.
    pub fn notice_for(&self, operation: Operation) -> Notice {
        match (operation, self) {
            (Operation::Add, CartError::Core(CoreError::InsufficientStock { .. })) => {
                Notice::StockExceeded
            }
            (Operation::Add, _) => Notice::AddFailed,

            (Operation::Remove, _) => Notice::RemoveFailed,

            (Operation::UpdateAmount, CartError::Core(CoreError::NotInCart(_))) => {
                Notice::UpdateFailed
            }
            (Operation::UpdateAmount, _) => Notice::StockExceeded,
        }
    }

    /// True when the error is a genuine stock violation rather than a
    /// transport, storage or lookup failure.
    pub fn is_stock_violation(&self) -> bool {
        matches!(self, CartError::Core(CoreError::InsufficientStock { .. }))
    }
}

// =============================================================================
// Notice
// =============================================================================

/// A user-visible notification raised by a failed cart operation.
///
/// ## Serialization
/// Serializes as its code, e.g. `"STOCK_EXCEEDED"`; the text comes from
/// [`Notice::message`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Notice {
    /// Requested quantity is larger than the stock.
    StockExceeded,
    /// Adding a product failed for any other reason.
    AddFailed,
    /// Removing a product failed (usually: it is not in the cart).
    RemoveFailed,
    /// The product whose amount should change is not in the cart.
    UpdateFailed,
}

impl Notice {
    /// Text shown to the shopper.
    pub const fn message(&self) -> &'static str {
        match self {
            Notice::StockExceeded => "Requested quantity is out of stock",
            Notice::AddFailed => "Error adding product",
            Notice::RemoveFailed => "Error removing product",
            Notice::UpdateFailed => "Error changing product quantity",
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stock_error() -> CartError {
        CartError::Core(CoreError::InsufficientStock {
            product_id: 1,
            available: 1,
            requested: 2,
        })
    }

    fn lookup_error() -> CartError {
        CartError::Catalog(CatalogError::NotFound {
            resource: "stock",
            id: 1,
        })
    }

    #[test]
    fn test_add_notices() {
        assert_eq!(stock_error().notice_for(Operation::Add), Notice::StockExceeded);
        assert_eq!(lookup_error().notice_for(Operation::Add), Notice::AddFailed);
    }

    #[test]
    fn test_remove_notices() {
        let missing = CartError::Core(CoreError::NotInCart(4));
        assert_eq!(missing.notice_for(Operation::Remove), Notice::RemoveFailed);

        let storage = CartError::Storage(StorageError::Unavailable("down".to_string()));
        assert_eq!(storage.notice_for(Operation::Remove), Notice::RemoveFailed);
    }

    #[test]
    fn test_update_notices_collapse_lookup_failures() {
        let missing = CartError::Core(CoreError::NotInCart(4));
        assert_eq!(missing.notice_for(Operation::UpdateAmount), Notice::UpdateFailed);

        assert_eq!(
            stock_error().notice_for(Operation::UpdateAmount),
            Notice::StockExceeded
        );
        assert_eq!(
            lookup_error().notice_for(Operation::UpdateAmount),
            Notice::StockExceeded
        );
        assert!(!lookup_error().is_stock_violation());
    }

    #[test]
    fn test_notice_text_and_code() {
        assert_eq!(Notice::StockExceeded.to_string(), "Requested quantity is out of stock");
        assert_eq!(
            serde_json::to_string(&Notice::UpdateFailed).unwrap(),
            r#""UPDATE_FAILED""#
        );
    }

    #[test]
    fn test_catalog_error_messages() {
        assert_eq!(lookup_error().to_string(), "Catalog request failed: stock 1 not found");

        let status = CatalogError::Status {
            status: 503,
            url: "http://localhost:3333/stock/1".to_string(),
        };
        assert_eq!(
            status.to_string(),
            "Catalog returned 503 for http://localhost:3333/stock/1"
        );
    }
}
