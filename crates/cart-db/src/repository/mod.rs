//! # Repository Module
//!
//! Database repository implementations.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CartStore                                                              │
//! │       │                                                                 │
//! │       │  db.blobs().set(key, json)                                      │
//! │       ▼                                                                 │
//! │  BlobRepository                                                         │
//! │  ├── get(&self, key)                                                    │
//! │  ├── get_entry(&self, key)                                              │
//! │  ├── set(&self, key, value)                                             │
//! │  └── delete(&self, key)                                                 │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database (kv_store)                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`BlobRepository`](blob::BlobRepository) - Key-value blobs

pub mod blob;
