//! Single-shot request for the current dollar quote.
//!
//! `fetch_quote` performs one GET against the quote service under a deadline
//! measured from call start. The deadline covers connecting, sending, and
//! reading the body; the remaining budget is forwarded in the
//! `x-request-deadline-ms` header so the service can shorten its own. There is
//! no retry.
use std::time::Duration;

use log::{debug, info};
use quote_common::net::{quote_url, DEADLINE_HEADER};
use quote_common::{BidResponse, Deadline, QuoteError, Result};
use reqwest::Client;

/// How long the requester waits for the service.
pub const MAX_WAIT: Duration = Duration::from_millis(300);

/// Default quote service base URL.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080";

/// Fetch the current bid from the service at `base_url`, waiting at most `max_wait`.
pub async fn fetch_quote(base_url: &str, max_wait: Duration) -> Result<String> {
    let deadline = Deadline::after(max_wait);
    let client = Client::builder()
        .user_agent(concat!("quote_client/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| QuoteError::Transport(e.to_string()))?;
    let url = quote_url(base_url);

    info!("Requesting quote from {} (max wait {:?})", url, max_wait);
    deadline
        .run("waiting for quote service", request_bid(&client, &url, &deadline))
        .await?
}

async fn request_bid(client: &Client, url: &str, deadline: &Deadline) -> Result<String> {
    let mut request = client.get(url);
    if let Some(remaining) = deadline.remaining() {
        request = request.header(DEADLINE_HEADER, remaining.as_millis().to_string());
    }

    let response = request
        .send()
        .await
        .map_err(|e| QuoteError::Transport(format!("GET {}: {}", url, e)))?;

    let status = response.status();
    if !status.is_success() {
        return Err(QuoteError::UnexpectedStatus(status.as_u16()));
    }

    let body = response
        .bytes()
        .await
        .map_err(|e| QuoteError::Transport(format!("reading response body: {}", e)))?;
    debug!("Quote service body: {}", String::from_utf8_lossy(&body));

    let response = BidResponse::from_json_bytes(&body)?;
    Ok(response.bid)
}
