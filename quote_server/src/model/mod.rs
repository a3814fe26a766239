//! Domain models for the quote service.
//!
//! - `quote` — the `Quote` created per successful upstream fetch and its persisted form.
//! - `upstream_quote` — typed view of the upstream provider's JSON payload.
//! - `stage` — per-request processing stages and the failure they map to.

pub mod quote;
pub mod stage;
pub mod upstream_quote;
