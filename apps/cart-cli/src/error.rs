//! # CLI Error Type
//!
//! Failures that stop the CLI before or after a cart operation runs.
//! Cart operations themselves never fail; they raise notices instead.

use cart_db::DbError;
use cart_store::CatalogError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    /// Bad command line; the message is shown above the usage text.
    #[error("{0}")]
    Usage(String),

    /// No explicit database path and no platform data directory.
    #[error("Could not determine app data directory (set CART_DB_PATH)")]
    NoDataDir,

    #[error("Could not create data directory: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Db(#[from] DbError),

    #[error("Catalog configuration error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Could not encode output: {0}")]
    Output(#[from] serde_json::Error),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => 2,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::Usage("missing id".to_string()).exit_code(), 2);
        assert_eq!(CliError::NoDataDir.exit_code(), 1);
    }
}
