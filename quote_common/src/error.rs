//! Error types shared between the quote service and the requester.
//!
//! The `QuoteError` enum covers every way a hop of the quote chain can fail:
//! an elapsed deadline, a broken connection, an unexpected HTTP status, an
//! unreadable payload on either side, a rejected store write, or a failed
//! file write. Each binary handles these at the point of occurrence.
use std::io;

use thiserror::Error;

/// Unified error type shared by client and server.
#[derive(Error, Debug)]
pub enum QuoteError {
    /// A deadline elapsed before the named operation completed.
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Connection-level failure (refused, reset, DNS, body stream broken).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The peer answered with a non-success HTTP status.
    #[error("Unexpected status: {0}")]
    UnexpectedStatus(u16),

    /// Response from the quote service is not JSON or lacks a string `bid`.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Response from the upstream provider is not JSON or lacks `USDBRL.bid`.
    #[error("Upstream decode error: {0}")]
    UpstreamDecode(String),

    /// The store rejected the insert or did not complete it in time.
    #[error("Store write error: {0}")]
    StoreWrite(String),

    /// Writing the quote file failed.
    #[error("File write error: {0}")]
    FileWrite(#[source] io::Error),

    /// Reading back stored quotes failed.
    #[error("Store read error: {0}")]
    StoreRead(String),

    /// Store could not be opened or initialised.
    #[error("Store init error: {0}")]
    StoreInit(String),

    /// Failure while encoding/decoding JSON via serde_json.
    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),
}

impl QuoteError {
    /// Returns `true` for deadline expiry, regardless of which hop hit it.
    pub fn is_timeout(&self) -> bool {
        matches!(self, QuoteError::Timeout(_))
    }
}
