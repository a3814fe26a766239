//! Quote Service binary.
//!
//! Opens the local quote store (fatal on failure), builds the upstream client,
//! and serves `GET /cotacao` until Ctrl+C. Each connection is handled on its own
//! tokio task; the store and the provider are the only shared state.
//!
//! Usage example (CLI):
//! ```bash
//! quote_server
//! quote_server --bind 127.0.0.1:8080 --db-path ./cotacoes.db
//! ```
#![warn(missing_docs)]
mod args;

use crate::args::Args;
use clap::Parser;
use log::{error, info};
use quote_server::store::SqliteQuoteStore;
use quote_server::upstream::HttpQuoteProvider;
use quote_server::{create_router, AppState};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    init_logger();
    let args = Args::parse();

    let store = match SqliteQuoteStore::open(&args.db_path) {
        Ok(store) => store,
        Err(e) => {
            error!("Failed to open quote store {}: {}", args.db_path.display(), e);
            return;
        }
    };
    let provider = match HttpQuoteProvider::new(&args.upstream_url) {
        Ok(provider) => provider,
        Err(e) => {
            error!("Failed to build upstream client: {}", e);
            return;
        }
    };

    let state = AppState::new(Arc::new(store), Arc::new(provider));
    let app = create_router(state);

    let listener = match tokio::net::TcpListener::bind(&args.bind).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {}: {}", args.bind, e);
            return;
        }
    };
    info!("Quote service listening on {}", args.bind);
    info!("Upstream: {}", args.upstream_url);

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {}", e);
    }
    info!("Quote service stopped");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Ctrl+C received. Shutting down server...");
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
