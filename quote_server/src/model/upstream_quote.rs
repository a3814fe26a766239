//! Typed view of the upstream provider payload.
//!
//! The provider answers with an object keyed by currency pair, e.g.
//! `{"USDBRL": {"bid": "5.43", "ask": "5.44", ...}}`. Only `USDBRL.bid` is read;
//! both levels are optional in the type so that absence is reported as
//! `QuoteError::UpstreamDecode` instead of failing somewhere later.
use quote_common::{QuoteError, Result};
use serde::Deserialize;

/// Pair key the service reads from the upstream payload.
pub const PAIR_KEY: &str = "USDBRL";

/// Root upstream object.
#[derive(Debug, Deserialize)]
pub struct UpstreamQuote {
    /// USD→BRL entry.
    #[serde(rename = "USDBRL")]
    pub usd_brl: Option<PairQuote>,
}

/// One currency pair entry.
#[derive(Debug, Deserialize)]
pub struct PairQuote {
    /// Bid as text.
    pub bid: Option<String>,
}

impl UpstreamQuote {
    /// Decode an upstream body and pull out the USD→BRL bid.
    pub fn bid_from_json_bytes(body: &[u8]) -> Result<String> {
        let quote: UpstreamQuote = serde_json::from_slice(body)
            .map_err(|e| QuoteError::UpstreamDecode(format!("invalid JSON: {}", e)))?;
        quote.into_bid()
    }

    /// Consume the payload, returning the bid or a typed decode failure.
    pub fn into_bid(self) -> Result<String> {
        let pair = self
            .usd_brl
            .ok_or_else(|| QuoteError::UpstreamDecode(format!("key '{}' not found", PAIR_KEY)))?;
        pair.bid.ok_or_else(|| {
            QuoteError::UpstreamDecode(format!("field 'bid' not found in '{}'", PAIR_KEY))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_bid_from_full_payload() {
        let body = br#"{"USDBRL":{"code":"USD","codein":"BRL","name":"Dolar Americano/Real Brasileiro",
            "high":"5.47","low":"5.40","bid":"5.4312","ask":"5.4342","timestamp":"1700000000"}}"#;
        assert_eq!(UpstreamQuote::bid_from_json_bytes(body).unwrap(), "5.4312");
    }

    #[test]
    fn missing_pair_is_decode_error() {
        let err = UpstreamQuote::bid_from_json_bytes(br#"{"EURBRL":{"bid":"6.1"}}"#).unwrap_err();
        assert!(matches!(err, QuoteError::UpstreamDecode(ref m) if m.contains("USDBRL")));
    }

    #[test]
    fn missing_bid_is_decode_error() {
        let err = UpstreamQuote::bid_from_json_bytes(br#"{"USDBRL":{"ask":"5.44"}}"#).unwrap_err();
        assert!(matches!(err, QuoteError::UpstreamDecode(ref m) if m.contains("bid")));
    }

    #[test]
    fn non_string_bid_and_garbage_are_decode_errors() {
        for body in [&br#"{"USDBRL":{"bid":5.43}}"#[..], b"<html>", br#"[]"#] {
            let err = UpstreamQuote::bid_from_json_bytes(body).unwrap_err();
            assert!(matches!(err, QuoteError::UpstreamDecode(_)), "{body:?} -> {err:?}");
        }
    }
}
