//! # cart-db: Database Layer for the Storefront Cart
//!
//! Local persistence for client-side state. The cart is stored as one JSON
//! blob under a fixed key; this crate neither knows nor cares what is inside.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Cart Data Flow                        │
//! │                                                                         │
//! │  CartStore (after every successful mutation)                           │
//! │       │                                                                 │
//! │       │  blobs.set("@RocketShoes:cart", "[{...}]")                      │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     cart-db (THIS CRATE)                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │◄───│  BlobRepo     │    │  (embedded)  │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite file (~/.local/share/storefront-cart/cart.db)                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cart_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/cart.db")).await?;
//!
//! db.blobs().set("@RocketShoes:cart", "[]").await?;
//! let raw = db.blobs().get("@RocketShoes:cart").await?;
//! ```

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::blob::{BlobRepository, StoredBlob};
