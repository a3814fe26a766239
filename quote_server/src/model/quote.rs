//! Quote data model.
//!
//! A `Quote` is created by the service on each successful upstream fetch and is
//! never modified afterwards. Its persisted counterpart, `QuoteRecord`, carries
//! the store-generated id.

use chrono::{DateTime, Utc};

/// USD→BRL bid observed at a point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    /// Moment the quote was accepted by the service.
    pub timestamp: DateTime<Utc>,
    /// Bid as text, exactly as the upstream sent it.
    pub bid: String,
}

impl Quote {
    /// Stamp `bid` with the current time.
    pub fn now(bid: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            bid: bid.into(),
        }
    }
}

/// Row of the `cotacoes` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteRecord {
    /// Auto-incremented by the store.
    pub id: i64,
    /// RFC 3339 timestamp.
    pub timestamp: String,
    /// Bid text.
    pub bid: String,
}
