//! # cart-store: Cart State Management
//!
//! Holds the shopper's cart, checks every change against the catalog's
//! stock, persists the cart after each successful change and tells the
//! shopper when something went wrong.
//!
//! ## Module Organization
//! ```text
//! cart_store/
//! ├── lib.rs          ◄─── You are here (exports)
//! ├── store.rs        ◄─── CartStore: add / remove / update amount
//! ├── catalog.rs      ◄─── Catalog trait + HttpCatalog
//! ├── storage.rs      ◄─── BlobStore trait + SQLite / memory stores
//! ├── notify.rs       ◄─── Notifier trait + tracing / buffered notifiers
//! ├── config.rs       ◄─── StoreConfig (defaults + environment)
//! └── error.rs        ◄─── CartError and the Notice shown to shoppers
//! ```
//!
//! ## Operation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  add_product(7)                                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Catalog: GET products/7, GET stock/7                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  cart-core: cart.with_product_added(&product, &stock)                  │
//! │       │                        │                                        │
//! │       │ Ok(next)               │ Err(e)                                 │
//! │       ▼                        ▼                                        │
//! │  BlobStore.set(key, json)   Notifier.notify(Notice)                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  publish next snapshot                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Operations never return errors to the caller. Every failure ends up as a
//! [`Notice`] handed to the [`Notifier`].

pub mod catalog;
pub mod config;
pub mod error;
pub mod notify;
pub mod storage;
pub mod store;

pub use catalog::{Catalog, HttpCatalog};
pub use config::StoreConfig;
pub use error::{CartError, CatalogError, Notice, Operation, StorageError};
pub use notify::{BufferedNotifier, Notifier, TracingNotifier};
pub use storage::{BlobStore, MemoryBlobStore, SqliteBlobStore};
pub use store::{CartStore, UpdateProductAmount, CART_STORAGE_KEY};

pub use cart_core::{Cart, CartItem, CartTotals, Product, ProductId, Stock};
