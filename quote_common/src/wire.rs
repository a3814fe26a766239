//! Payload exchanged between the quote service and the requester.
//!
//! The service answers `GET /cotacao` with `{"bid": "<string>"}`. The bid stays
//! text end to end so the decimal formatting of the upstream source is kept.
use serde::{Deserialize, Serialize};

use crate::error::QuoteError;
use crate::result::Result;

/// Trimmed quote returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BidResponse {
    /// Quoted buy price, as text.
    pub bid: String,
}

impl BidResponse {
    /// Creates a response carrying `bid`.
    pub fn new(bid: impl Into<String>) -> Self {
        Self { bid: bid.into() }
    }

    /// Decode a service response body.
    ///
    /// Anything that is not a JSON object with a string `bid` field is a
    /// `QuoteError::Decode`.
    pub fn from_json_bytes(body: &[u8]) -> Result<Self> {
        serde_json::from_slice(body).map_err(|e| QuoteError::Decode(e.to_string()))
    }

    /// Encode the response to JSON bytes.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>> {
        let json = serde_json::to_vec(self)?;
        Ok(json)
    }
}
