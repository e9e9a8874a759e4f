//! # Storefront Library
//!
//! The product-page backend: owns the state, exposes the commands and wires
//! storage plus the product API together at startup.
//!
//! ## Module Organization
//! ```text
//! storefront/
//! ├── lib.rs          ◄─── You are here (startup & wiring)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── details.rs  ◄─── Resolver + gallery + fetch generations
//! │   ├── cart.rs     ◄─── Cart aggregator, written through to storage
//! │   ├── settings.rs ◄─── Language / currency, written through to storage
//! │   └── config.rs   ◄─── Configuration state
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── product.rs  ◄─── Load, select, gallery
//! │   ├── cart.rs     ◄─── Cart manipulation
//! │   ├── settings.rs ◄─── Preferences
//! │   └── reviews.rs  ◄─── Rating stats
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod commands;
pub mod error;
pub mod state;

use std::path::PathBuf;

use directories::ProjectDirs;
use storefront_client::{ClientError, ProductClient};
use storefront_db::{Database, DbConfig, DbError};
use thiserror::Error;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use commands::product::DetailsResponse;
use error::ApiError;
use state::{CartState, ConfigState, DetailsState, SettingsState};

/// Errors that stop the storefront from starting.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Storage unavailable: {0}")]
    Database(#[from] DbError),

    #[error("Product client misconfigured: {0}")]
    Client(#[from] ClientError),

    #[error("Could not determine app data directory")]
    NoDataDir,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// All state owners plus their collaborators.
#[derive(Debug)]
pub struct Storefront {
    pub config: ConfigState,
    pub client: ProductClient,
    pub db: Database,
    pub details: DetailsState,
    pub cart: CartState,
    pub settings: SettingsState,
}

impl Storefront {
    /// Opens storage and rehydrates the cart and settings.
    ///
    /// ## Startup Sequence
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────────┐
    /// │                       Storefront Startup                                │
    /// │                                                                         │
    /// │  1. Product client ───────────────────────────────────────────────────► │
    /// │     • base URL validated, request timeout applied                       │
    /// │                                                                         │
    /// │  2. Connect to Database ──────────────────────────────────────────────► │
    /// │     • SQLite with WAL mode                                              │
    /// │     • Run pending migrations                                            │
    /// │                                                                         │
    /// │  3. Rehydrate ────────────────────────────────────────────────────────► │
    /// │     • "cart-storage"     → CartState (empty when missing/corrupt)       │
    /// │     • "settings-storage" → SettingsState (defaults when missing)        │
    /// │                                                                         │
    /// │  4. Details ──────────────────────────────────────────────────────────► │
    /// │     • empty resolver with the configured case rules                     │
    /// └─────────────────────────────────────────────────────────────────────────┘
    /// ```
    pub async fn open(config: ConfigState, db_config: DbConfig) -> Result<Self, StartupError> {
        let client = ProductClient::new(&config.api_url, config.http_timeout())?;

        let db = Database::new(db_config).await?;
        info!("Database connected and migrations applied");

        let cart = CartState::load(db.carts()).await?;
        let settings = SettingsState::load(db.settings(), &config.default_currency).await?;
        let details = DetailsState::new(config.resolver_config());

        Ok(Storefront {
            config,
            client,
            db,
            details,
            cart,
            settings,
        })
    }

    pub async fn load_product(&self, slug: &str) -> Result<DetailsResponse, ApiError> {
        commands::product::load_product(
            &self.client,
            &self.config,
            &self.details,
            &self.settings,
            slug,
        )
        .await
    }

    pub async fn close(&self) {
        self.db.close().await;
    }
}

/// Runs the storefront binary: starts up, loads the configured product and
/// prints the details panel as JSON.
pub async fn run(slug: Option<String>) -> Result<(), StartupError> {
    info!("Starting storefront");

    let config = ConfigState::from_env();
    let db_path = database_path(&config)?;
    info!(?db_path, api_url = %config.api_url, "Configuration loaded");

    let app = Storefront::open(config, DbConfig::new(db_path)).await?;

    let slug = slug.unwrap_or_else(|| app.config.product_slug.clone());
    match app.load_product(&slug).await {
        Ok(details) => {
            info!(
                slug = %slug,
                resolved = ?details.variant.as_ref().map(|v| v.id.as_str()),
                "Details ready"
            );
            match serde_json::to_string_pretty(&details) {
                Ok(json) => println!("{}", json),
                Err(e) => warn!(error = %e, "Could not render details"),
            }
        }
        // the cart and settings stay usable without a product
        Err(e) => warn!(slug = %slug, error = %e, "Product unavailable"),
    }

    let cart = commands::cart::get_cart(&app.cart, &app.settings).await;
    info!(
        lines = cart.items.len(),
        items = cart.total_items,
        total = %cart.formatted_total,
        "Cart"
    );

    app.close().await;
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=storefront=trace` - Show trace for the app only
/// - Default: INFO, DEBUG for the app
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,storefront=debug,sqlx=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Determines the database file path.
///
/// ## Platform-Specific Paths
/// - **macOS**: `~/Library/Application Support/com.storefront.app/storefront.db`
/// - **Windows**: `%APPDATA%\storefront\app\data\storefront.db`
/// - **Linux**: `~/.local/share/storefront/storefront.db`
///
/// ## Development Override
/// Set `STOREFRONT_DB_PATH` to use a custom path.
fn database_path(config: &ConfigState) -> Result<PathBuf, StartupError> {
    if let Some(path) = &config.db_path {
        return Ok(path.clone());
    }

    let proj_dirs = ProjectDirs::from("com", "storefront", "app").ok_or(StartupError::NoDataDir)?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)?;

    Ok(data_dir.join("storefront.db"))
}
