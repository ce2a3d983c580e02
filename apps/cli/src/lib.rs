//! # ShoeCart CLI
//!
//! One cart operation per invocation against the configured catalog API and
//! local database.
//!
//! ```text
//! shoecart [--config PATH] show
//! shoecart [--config PATH] add <ID>
//! shoecart [--config PATH] remove <ID>
//! shoecart [--config PATH] update <ID> <AMOUNT>
//! shoecart [--config PATH] clear-storage
//! ```
//!
//! On success the cart is printed to stdout as JSON with its totals. On a
//! failed operation the notification message goes to stderr and the exit
//! code is 1.

pub mod output;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use shoecart_core::{CoreResult, ProductId};
use shoecart_db::{Database, DbConfig};
use shoecart_store::{
    CartSnapshot, CartStore, ChannelNotifier, HttpCatalog, Notification, ShoeCartConfig,
    SqliteStore,
};
use tokio::sync::broadcast;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::output::{CartView, ClearedView};

// =============================================================================
// Arguments
// =============================================================================

#[derive(Debug, Parser)]
#[command(name = "shoecart", version, about = "Shopping cart backed by a stock-checked catalog")]
pub struct Cli {
    /// Config file; defaults to the platform config dir
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Print the current cart
    Show,

    /// Add one unit of a product
    Add {
        /// Product id
        id: u32,
    },

    /// Remove a product from the cart
    Remove {
        /// Product id
        id: u32,
    },

    /// Set a product's quantity
    Update {
        /// Product id
        id: u32,

        /// New quantity (1..=available stock)
        #[arg(allow_negative_numbers = true)]
        amount: i64,
    },

    /// Delete the persisted cart slot
    ClearStorage,
}

// =============================================================================
// Setup
// =============================================================================

/// Filter directives used when `RUST_LOG` is unset.
fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "debug,sqlx=warn"
    } else {
        "info,shoecart=debug,sqlx=warn"
    }
}

/// Initializes the tracing subscriber on stderr.
///
/// ## Log Levels
/// - Default: `info,shoecart=debug,sqlx=warn`
/// - `-v`: `debug,sqlx=warn`
/// - Override with `RUST_LOG` environment variable
pub fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn open_database(config: &ShoeCartConfig) -> anyhow::Result<Database> {
    let path = config
        .database_path()
        .context("no data directory available; set storage.database_path")?;

    Database::new(DbConfig::new(path))
        .await
        .context("opening cart database")
}

async fn open_store(
    config: &ShoeCartConfig,
    db: Database,
    notifier: ChannelNotifier,
) -> anyhow::Result<CartStore> {
    let catalog = Arc::new(HttpCatalog::from_config(&config.api).context("building API client")?);

    let store = CartStore::builder(catalog.clone(), catalog)
        .storage(Arc::new(SqliteStore::new(db)))
        .notifier(Arc::new(notifier))
        .policy(config.policy())
        .storage_key(config.storage.key.clone())
        .open()
        .await
        .context("loading cart")?;

    Ok(store)
}

// =============================================================================
// Commands
// =============================================================================

/// Runs one command end to end.
pub async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = ShoeCartConfig::load(cli.config.clone()).context("loading configuration")?;
    let db = open_database(&config).await?;

    let code = match cli.command {
        Command::ClearStorage => {
            let cleared = db.storage().delete(&config.storage.key).await?;
            info!(key = %config.storage.key, cleared, "Cart storage cleared");
            println!("{}", ClearedView::new(&config.storage.key, cleared).to_json()?);
            ExitCode::SUCCESS
        }
        command => {
            let notifier = ChannelNotifier::default();
            let mut notifications = notifier.subscribe();
            let store = open_store(&config, db.clone(), notifier).await?;

            let result = execute(&store, &command).await;
            if report(result, &mut notifications)? {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
    };

    db.close().await;
    Ok(code)
}

/// Dispatches a cart command to the store.
pub async fn execute(store: &CartStore, command: &Command) -> CoreResult<CartSnapshot> {
    match *command {
        Command::Show | Command::ClearStorage => Ok(store.cart()),
        Command::Add { id } => store.add_product(ProductId::new(id)).await,
        Command::Remove { id } => store.remove_product(ProductId::new(id)).await,
        Command::Update { id, amount } => {
            store.update_product_amount(ProductId::new(id), amount).await
        }
    }
}

/// Prints the outcome; returns whether the operation succeeded.
fn report(
    result: CoreResult<CartSnapshot>,
    notifications: &mut broadcast::Receiver<Notification>,
) -> anyhow::Result<bool> {
    match result {
        Ok(snapshot) => {
            println!("{}", CartView::new(&snapshot).to_json()?);
            Ok(true)
        }
        Err(error) => {
            while let Ok(notification) = notifications.try_recv() {
                eprintln!("{}", notification);
            }
            eprintln!("error: {}", error);
            Ok(false)
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use shoecart_core::{CartError, Money, Product, StockLevel};
    use shoecart_store::{
        ClientResult, MemoryStore, NotificationSink, ProductCatalog, StockService,
    };
    use tracing::Level;

    struct OneShoe;

    #[async_trait]
    impl ProductCatalog for OneShoe {
        async fn product(&self, id: ProductId) -> ClientResult<Option<Product>> {
            Ok((id.get() == 1)
                .then(|| Product::new(id, "Shoe", Money::from_cents(17990), "shoe.jpg")))
        }
    }

    #[async_trait]
    impl StockService for OneShoe {
        async fn stock(&self, id: ProductId) -> ClientResult<Option<StockLevel>> {
            Ok(Some(StockLevel::new(id, 5)))
        }
    }

    async fn store() -> CartStore {
        CartStore::builder(Arc::new(OneShoe), Arc::new(OneShoe))
            .storage(Arc::new(MemoryStore::new()))
            .open()
            .await
            .unwrap()
    }

    #[test]
    fn test_parse_commands() {
        let cli = Cli::try_parse_from(["shoecart", "add", "1"]).unwrap();
        assert_eq!(cli.command, Command::Add { id: 1 });
        assert_eq!(cli.config, None);

        let cli =
            Cli::try_parse_from(["shoecart", "--config", "/tmp/s.toml", "update", "3", "-2"])
                .unwrap();
        assert_eq!(cli.command, Command::Update { id: 3, amount: -2 });
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/s.toml")));

        let cli = Cli::try_parse_from(["shoecart", "clear-storage", "-v"]).unwrap();
        assert_eq!(cli.command, Command::ClearStorage);
        assert!(cli.verbose);
    }

    #[test]
    fn test_default_log_filter() {
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new(default_directives(false)))
            .with_writer(std::io::sink)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            assert!(tracing::enabled!(target: "shoecart_store::store", Level::DEBUG));
            assert!(tracing::enabled!(target: "hyper::client", Level::INFO));
            assert!(!tracing::enabled!(target: "hyper::client", Level::DEBUG));
            assert!(tracing::enabled!(target: "sqlx::query", Level::WARN));
            assert!(!tracing::enabled!(target: "sqlx::query", Level::INFO));
        });
    }

    #[test]
    fn test_verbose_log_filter() {
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new(default_directives(true)))
            .with_writer(std::io::sink)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            assert!(tracing::enabled!(target: "hyper::client", Level::DEBUG));
            assert!(!tracing::enabled!(target: "hyper::client", Level::TRACE));
            assert!(!tracing::enabled!(target: "sqlx::query", Level::DEBUG));
        });
    }

    #[test]
    fn test_parse_rejects_bad_ids() {
        assert!(Cli::try_parse_from(["shoecart", "add", "-1"]).is_err());
        assert!(Cli::try_parse_from(["shoecart", "remove"]).is_err());
        assert!(Cli::try_parse_from(["shoecart"]).is_err());
    }

    #[tokio::test]
    async fn test_execute_dispatches() {
        let store = store().await;

        execute(&store, &Command::Add { id: 1 }).await.unwrap();
        let snapshot = execute(&store, &Command::Update { id: 1, amount: 4 })
            .await
            .unwrap();
        assert_eq!(snapshot.cart.quantity_of(ProductId::new(1)), Some(4));

        assert_eq!(execute(&store, &Command::Show).await.unwrap(), snapshot);

        let err = execute(&store, &Command::Remove { id: 2 }).await.unwrap_err();
        assert_eq!(err, CartError::ProductNotInCart(ProductId::new(2)));
    }

    #[tokio::test]
    async fn test_report_outcomes() {
        let store = store().await;
        let notifier = ChannelNotifier::default();
        let mut rx = notifier.subscribe();

        assert!(report(Ok(store.cart()), &mut rx).unwrap());

        notifier.notify(Notification::AddFailed);
        let err = CartError::ProductNotFound(ProductId::new(9));
        assert!(!report(Err(err), &mut rx).unwrap());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_cart_view_json() {
        let store = store().await;
        store.add_product(ProductId::new(1)).await.unwrap();
        let snapshot = store.update_product_amount(ProductId::new(1), 2).await.unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&CartView::new(&snapshot).to_json().unwrap()).unwrap();

        assert_eq!(json["version"], 2);
        assert_eq!(json["items"][0]["id"], 1);
        assert_eq!(json["items"][0]["amount"], 2);
        assert_eq!(json["items"][0]["price"], 179.9);
        assert_eq!(json["totals"]["itemCount"], 1);
        assert_eq!(json["totals"]["subtotalCents"], 35980);
        assert!(json["updatedAt"].is_string());
    }
}
