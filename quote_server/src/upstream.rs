//! Upstream quote provider.
//!
//! `QuoteProvider` is the single request/response contract with the third-party
//! rates API: one call returns the raw body of the latest USD→BRL quote. The
//! HTTP implementation issues a plain GET and does not look at the status code;
//! a non-JSON error page simply fails decoding later.
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use quote_common::{QuoteError, Result};
use reqwest::Client;

/// Public endpoint for the latest USD→BRL quote.
pub const DEFAULT_UPSTREAM_URL: &str = "https://economia.awesomeapi.com.br/json/last/USD-BRL";

/// Source of raw upstream quote payloads.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Fetch the body of the latest quote.
    async fn fetch_latest(&self) -> Result<Vec<u8>>;
}

/// `QuoteProvider` backed by an HTTP GET to a fixed URL.
pub struct HttpQuoteProvider {
    client: Client,
    url: String,
}

impl HttpQuoteProvider {
    /// Build a provider for `url`.
    ///
    /// The client carries no request timeout of its own.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("quote_server/", env!("CARGO_PKG_VERSION")))
            .tcp_keepalive(Some(Duration::from_secs(30)))
            .build()
            .map_err(|e| QuoteError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl QuoteProvider for HttpQuoteProvider {
    async fn fetch_latest(&self) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| QuoteError::Transport(format!("GET {}: {}", self.url, e)))?;
        debug!("Upstream answered {} for {}", response.status(), self.url);

        let body = response
            .bytes()
            .await
            .map_err(|e| QuoteError::Transport(format!("reading upstream body: {}", e)))?;
        Ok(body.to_vec())
    }
}
