//! # Cart CLI
//!
//! Command-line front end for the storefront cart.
//!
//! ## Module Organization
//! ```text
//! cart_cli/
//! ├── lib.rs          ◄─── You are here (logging, wiring, run)
//! ├── command.rs      ◄─── Argument parsing and dispatch
//! └── error.rs        ◄─── Startup / usage errors
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       CLI Startup                                       │
//! │                                                                         │
//! │  1. Initialize Logging ───────────────────────────────────────────────► │
//! │     • tracing-subscriber with env filter, written to stderr             │
//! │     • Default: info,cart=debug,sqlx=warn; override with RUST_LOG        │
//! │                                                                         │
//! │  2. Parse Command ────────────────────────────────────────────────────► │
//! │                                                                         │
//! │  3. Load StoreConfig from CART_* variables ───────────────────────────► │
//! │                                                                         │
//! │  4. Open Database ────────────────────────────────────────────────────► │
//! │     • SQLite with WAL mode, pending migrations applied                  │
//! │                                                                         │
//! │  5. Wire CartStore ───────────────────────────────────────────────────► │
//! │     • HttpCatalog, SqliteBlobStore, BufferedNotifier                    │
//! │                                                                         │
//! │  6. Execute, print cart JSON and notices to stdout ───────────────────► │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod command;
pub mod error;

use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use cart_db::{Database, DbConfig};
use cart_store::{BufferedNotifier, CartStore, HttpCatalog, SqliteBlobStore, StoreConfig};

use command::{Command, USAGE};
use error::CliError;

/// Runs the CLI with the arguments after the program name and returns the
/// process exit code.
pub async fn run<I>(args: I) -> i32
where
    I: IntoIterator<Item = String>,
{
    init_tracing();

    match try_run(args).await {
        Ok(()) => 0,
        Err(CliError::Usage(message)) => {
            eprintln!("{}\n\n{}", message, USAGE);
            2
        }
        Err(e) => {
            error!(error = %e, "Command failed");
            eprintln!("error: {}", e);
            e.exit_code()
        }
    }
}

async fn try_run<I>(args: I) -> Result<(), CliError>
where
    I: IntoIterator<Item = String>,
{
    let command = Command::parse(args)?;

    if command == Command::Help {
        println!("{}", USAGE);
        return Ok(());
    }

    let config = StoreConfig::from_env();
    let notifier = BufferedNotifier::new();
    let (store, db) = open_store(&config, notifier.clone()).await?;

    let output = command::execute(&store, command, || notifier.drain()).await;
    println!("{}", serde_json::to_string_pretty(&output)?);

    db.close().await;
    Ok(())
}

/// Initializes the tracing subscriber.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=cart_store=trace` - Trace the store only
/// - Default: `info,cart=debug,sqlx=warn`
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,cart=debug,sqlx=warn"));

    // A second init (tests calling run twice) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Opens the database named by `config` and builds a store on top of it.
///
/// The returned [`Database`] should be closed once the store is done.
pub async fn open_store(
    config: &StoreConfig,
    notifier: BufferedNotifier,
) -> Result<(CartStore, Database), CliError> {
    let db_path = config.resolve_database_path().ok_or(CliError::NoDataDir)?;

    if let Some(dir) = db_path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }

    info!(?db_path, api_url = %config.api_url, "Opening cart");

    let db = Database::new(DbConfig::new(db_path)).await?;
    let catalog = HttpCatalog::new(config.api_url.clone())?;

    let store = CartStore::load(
        Arc::new(catalog),
        Arc::new(SqliteBlobStore::new(&db)),
        Arc::new(notifier),
        config.storage_key.clone(),
    )
    .await;

    Ok((store, db))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_db(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("cart-cli-{}-{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        dir.join("nested").join("cart.db")
    }

    #[tokio::test]
    async fn test_open_store_creates_database() {
        let path = temp_db("open");
        let config = StoreConfig {
            database_path: Some(path.clone()),
            ..StoreConfig::default()
        };

        let (store, db) = open_store(&config, BufferedNotifier::new()).await.unwrap();

        assert!(store.cart().is_empty());
        assert_eq!(store.storage_key(), "@RocketShoes:cart");
        assert!(db.health_check().await);
        assert!(path.exists());

        db.close().await;
    }

    #[tokio::test]
    async fn test_open_store_rejects_bad_api_url() {
        let config = StoreConfig {
            api_url: "localhost".to_string(),
            database_path: Some(temp_db("bad-url")),
            ..StoreConfig::default()
        };

        let err = open_store(&config, BufferedNotifier::new()).await.unwrap_err();
        assert!(matches!(err, CliError::Catalog(_)));
    }

    #[tokio::test]
    async fn test_run_usage_errors() {
        assert_eq!(run(vec!["frobnicate".to_string()]).await, 2);
        assert_eq!(run(vec!["help".to_string()]).await, 0);
    }
}
