//! # Storefront Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront                                       │
//! │                                                                         │
//! │  main.rs ────► logging, runtime, exit code                             │
//! │  lib.rs ─────► config, storage, rehydration, product load              │
//! │  commands/ ──► load_product, select_variation, add_selected_to_cart    │
//! │  state/ ─────► DetailsState, CartState, SettingsState, ConfigState     │
//! │                                                                         │
//! │          ┌───────────────────┐          ┌───────────────────┐           │
//! │          │  Product API      │          │  SQLite (WAL)     │           │
//! │          │  GET /products/.. │          │  kv_store         │           │
//! │          └───────────────────┘          └───────────────────┘           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Usage: `storefront [SLUG]` (defaults to `STOREFRONT_PRODUCT_SLUG`).

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    storefront::init_tracing();

    match storefront::run(std::env::args().nth(1)).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Storefront failed to start");
            ExitCode::FAILURE
        }
    }
}
