//! Quote Service library.
//!
//! Serves the latest USD→BRL bid over `GET /cotacao`. Each request fetches the
//! quote from the upstream provider, appends it to a local SQLite store, and
//! answers `{"bid": "<value>"}`. The building blocks:
//!
//! - `handler` — the per-request stage machine and its deadlines.
//! - `upstream` — `QuoteProvider` contract and its HTTP implementation.
//! - `store` — `QuoteStore` contract and the SQLite implementation.
//! - `model` — quote types, the typed upstream payload, and request stages.
//!
//! The binary in `main.rs` only wires these together; tests build the same
//! router with stub collaborators.
#![warn(missing_docs)]
use axum::routing::get;
use axum::Router;
use quote_common::net::QUOTE_PATH;

pub mod handler;
pub mod model;
pub mod store;
pub mod upstream;

pub use handler::AppState;

/// Router exposing the quote endpoint over `state`.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(QUOTE_PATH, get(handler::get_quote))
        .with_state(state)
}
