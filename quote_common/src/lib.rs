//!
//! Common types and utilities shared by the quote service and requester.
//!
//! This crate aggregates:
//! - `error` — unified error type `QuoteError` used across the workspace.
//! - `result` — handy `Result<T, QuoteError>` alias.
//! - `deadline` — explicit deadlines derived and checked at each hop.
//! - `wire` — the `{"bid": ...}` payload served to clients.
//! - `net` — networking constants and small helpers.
#![warn(missing_docs)]
pub mod deadline;
pub mod error;
pub mod net;
pub mod result;
pub mod wire;

pub use deadline::Deadline;
pub use error::QuoteError;
pub use result::Result;
pub use wire::BidResponse;
