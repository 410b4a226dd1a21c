//! # Store Configuration
//!
//! Where the catalog lives, where the cart is persisted and under which key.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`CART_*`)
//! 2. Defaults (this file)

use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::store::CART_STORAGE_KEY;

/// Default catalog API root.
pub const DEFAULT_API_URL: &str = "http://localhost:3333";

/// Cart store configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreConfig {
    /// Catalog API root (`GET {api_url}/products/{id}`).
    pub api_url: String,

    /// SQLite file holding the persisted cart.
    /// `None` means the platform data directory.
    pub database_path: Option<PathBuf>,

    /// Key the cart blob is stored under.
    pub storage_key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            api_url: DEFAULT_API_URL.to_string(),
            database_path: None,
            storage_key: CART_STORAGE_KEY.to_string(),
        }
    }
}

impl StoreConfig {
    /// Creates a config from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `CART_API_URL`: catalog API root
    /// - `CART_DB_PATH`: SQLite file path
    /// - `CART_STORAGE_KEY`: blob key for the cart
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`StoreConfig::from_env`], reading variables through `lookup`.
    /// Empty values are ignored.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let mut config = StoreConfig::default();

        if let Some(url) = var("CART_API_URL") {
            config.api_url = url;
        }

        if let Some(path) = var("CART_DB_PATH") {
            config.database_path = Some(PathBuf::from(path));
        }

        if let Some(key) = var("CART_STORAGE_KEY") {
            config.storage_key = key;
        }

        config
    }

    /// Resolves the database file path.
    ///
    /// ## Platform-Specific Defaults
    /// - **macOS**: `~/Library/Application Support/com.storefront.cart/cart.db`
    /// - **Windows**: `%APPDATA%\storefront\cart\data\cart.db`
    /// - **Linux**: `~/.local/share/cart/cart.db`
    ///
    /// Returns `None` if no explicit path is set and the platform has no
    /// data directory.
    pub fn resolve_database_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.database_path {
            return Some(path.clone());
        }

        ProjectDirs::from("com", "storefront", "cart").map(|dirs| dirs.data_dir().join("cart.db"))
    }
}
