//! `GET /cotacao` handler.
//!
//! Each request walks the stages in `model::stage` once:
//!
//! 1. `DeadlineCheck` — a 200 ms deadline is derived from the caller's own
//!    deadline (`x-request-deadline-ms`, measured from arrival). If it is already
//!    spent the request fails right away.
//! 2. `UpstreamFetch` — the provider is called. The deadline was checked on entry
//!    only; the call itself runs unbounded and can overrun the 200 ms budget.
//! 3. `Parse` — typed decode of `USDBRL.bid`.
//! 4. `StoreInsert` — the quote is appended under a fresh 10 ms deadline that is
//!    independent of the request budget.
//! 5. `Respond` — `{"bid": "<value>"}` encoded as `application/json`.
//!
//! Any failure ends in `StageFailure`, rendered as a plain-text 500.
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{FromRequestParts, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use axum::async_trait;
use log::{debug, info, warn};
use quote_common::net::DEADLINE_HEADER;
use quote_common::{BidResponse, Deadline, QuoteError};
use tokio::time::Instant;

use crate::model::quote::Quote;
use crate::model::stage::{Stage, StageFailure};
use crate::model::upstream_quote::UpstreamQuote;
use crate::store::QuoteStore;
use crate::upstream::QuoteProvider;

/// Per-request budget, derived from the inbound deadline.
pub const REQUEST_BUDGET: Duration = Duration::from_millis(200);
/// Budget for the store insert, started fresh right before it.
pub const STORE_BUDGET: Duration = Duration::from_millis(10);

/// Collaborators injected into every request task.
#[derive(Clone)]
pub struct AppState {
    /// Append-only quote store.
    pub store: Arc<dyn QuoteStore>,
    /// Upstream rates API.
    pub provider: Arc<dyn QuoteProvider>,
}

impl AppState {
    /// Bundle a store and a provider.
    pub fn new(store: Arc<dyn QuoteStore>, provider: Arc<dyn QuoteProvider>) -> Self {
        Self { store, provider }
    }
}

/// Deadline the caller attached to the inbound request.
///
/// Unbounded when the header is absent or malformed.
#[derive(Debug, Clone, Copy)]
pub struct InboundDeadline(pub Deadline);

#[async_trait]
impl<S> FromRequestParts<S> for InboundDeadline
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let arrived = Instant::now();
        let Some(value) = parts.headers.get(DEADLINE_HEADER) else {
            return Ok(InboundDeadline(Deadline::none()));
        };

        match value.to_str().ok().and_then(|v| v.trim().parse::<u64>().ok()) {
            Some(ms) => Ok(InboundDeadline(Deadline::at(
                arrived + Duration::from_millis(ms),
            ))),
            None => {
                warn!("Ignoring malformed {} header: {:?}", DEADLINE_HEADER, value);
                Ok(InboundDeadline(Deadline::none()))
            }
        }
    }
}

/// Axum entry point for `GET /cotacao`.
pub async fn get_quote(
    State(state): State<AppState>,
    InboundDeadline(inbound): InboundDeadline,
) -> Result<Response, StageFailure> {
    let deadline = inbound.child(REQUEST_BUDGET);
    let response = serve_quote(&state, deadline).await?;
    let body = response
        .to_json_bytes()
        .map_err(StageFailure::at(Stage::Respond))?;
    info!("Served quote bid={}", response.bid);
    Ok(([(CONTENT_TYPE, "application/json")], body).into_response())
}

/// Runs one request through all stages under `deadline`.
pub async fn serve_quote(state: &AppState, deadline: Deadline) -> Result<BidResponse, StageFailure> {
    if deadline.is_expired() {
        return Err(StageFailure::new(
            Stage::DeadlineCheck,
            QuoteError::Timeout("request deadline elapsed before upstream fetch".to_string()),
        ));
    }
    debug!("Request budget left: {:?}", deadline.remaining());

    // Checked on entry only; the upstream call is not bounded by `deadline`.
    let body = state
        .provider
        .fetch_latest()
        .await
        .map_err(StageFailure::at(Stage::UpstreamFetch))?;

    let bid = UpstreamQuote::bid_from_json_bytes(&body).map_err(StageFailure::at(Stage::Parse))?;
    let quote = Quote::now(bid);

    let store_deadline = Deadline::after(STORE_BUDGET);
    let id = match store_deadline.run("store insert", state.store.insert(&quote)).await {
        Ok(inserted) => inserted.map_err(StageFailure::at(Stage::StoreInsert))?,
        Err(elapsed) => {
            return Err(StageFailure::new(
                Stage::StoreInsert,
                QuoteError::StoreWrite(elapsed.to_string()),
            ));
        }
    };
    debug!("Quote {} stored at {}", id, quote.timestamp);

    Ok(BidResponse::new(quote.bid))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use quote_common::Result;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CannedProvider {
        body: &'static [u8],
        calls: AtomicUsize,
        delay: Duration,
    }

    impl CannedProvider {
        fn new(body: &'static [u8]) -> Self {
            Self {
                body,
                calls: AtomicUsize::new(0),
                delay: Duration::ZERO,
            }
        }
    }

    #[async_trait]
    impl QuoteProvider for CannedProvider {
        async fn fetch_latest(&self) -> Result<Vec<u8>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            Ok(self.body.to_vec())
        }
    }

    #[derive(Default)]
    struct MemoryStore {
        rows: Mutex<Vec<Quote>>,
        delay: Duration,
        reject: bool,
    }

    #[async_trait]
    impl QuoteStore for MemoryStore {
        async fn insert(&self, quote: &Quote) -> Result<i64> {
            tokio::time::sleep(self.delay).await;
            if self.reject {
                return Err(QuoteError::StoreWrite("disk I/O error".to_string()));
            }
            let mut rows = self.rows.lock();
            rows.push(quote.clone());
            Ok(rows.len() as i64)
        }
    }

    fn state(provider: Arc<CannedProvider>, store: Arc<MemoryStore>) -> AppState {
        AppState::new(store, provider)
    }

    const GOOD: &[u8] = br#"{"USDBRL":{"bid":"5.43"}}"#;

    #[tokio::test(start_paused = true)]
    async fn valid_upstream_is_echoed_and_stored_once() {
        let store = Arc::new(MemoryStore::default());
        let provider = Arc::new(CannedProvider::new(GOOD));
        let state = state(provider.clone(), store.clone());

        let resp = serve_quote(&state, Deadline::none().child(REQUEST_BUDGET)).await.unwrap();
        assert_eq!(resp, BidResponse::new("5.43"));
        let rows = store.rows.lock();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].bid, "5.43");
    }

    #[tokio::test]
    async fn get_quote_answers_json_bytes() {
        let store = Arc::new(MemoryStore::default());
        let provider = Arc::new(CannedProvider::new(GOOD));
        let state = state(provider, store);

        let response = get_quote(State(state), InboundDeadline(Deadline::none()))
            .await
            .unwrap();
        assert_eq!(response.status(), axum::http::StatusCode::OK);
        assert_eq!(response.headers()[CONTENT_TYPE], "application/json");
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], br#"{"bid":"5.43"}"#);
    }

    #[tokio::test(start_paused = true)]
    async fn expired_deadline_fails_before_upstream() {
        let store = Arc::new(MemoryStore::default());
        let provider = Arc::new(CannedProvider::new(GOOD));
        let state = state(provider.clone(), store.clone());

        let spent = Deadline::after(Duration::ZERO).child(REQUEST_BUDGET);
        let failure = serve_quote(&state, spent).await.unwrap_err();
        assert_eq!(failure.stage, Stage::DeadlineCheck);
        assert!(failure.error.is_timeout());
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
        assert!(store.rows.lock().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn slow_upstream_overruns_request_budget() {
        let store = Arc::new(MemoryStore::default());
        let mut provider = CannedProvider::new(GOOD);
        provider.delay = Duration::from_millis(500);
        let state = state(Arc::new(provider), store.clone());

        let resp = serve_quote(&state, Deadline::none().child(REQUEST_BUDGET)).await.unwrap();
        assert_eq!(resp.bid, "5.43");
        assert_eq!(store.rows.lock().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn missing_bid_fails_at_parse_without_row() {
        let store = Arc::new(MemoryStore::default());
        let provider = Arc::new(CannedProvider::new(br#"{"USDBRL":{"ask":"5.44"}}"#));
        let state = state(provider, store.clone());

        let failure = serve_quote(&state, Deadline::none()).await.unwrap_err();
        assert_eq!(failure.stage, Stage::Parse);
        assert!(matches!(failure.error, QuoteError::UpstreamDecode(_)));
        assert!(store.rows.lock().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn slow_store_is_store_write_error() {
        let store = Arc::new(MemoryStore {
            delay: Duration::from_millis(50),
            ..Default::default()
        });
        let provider = Arc::new(CannedProvider::new(GOOD));
        let state = state(provider, store.clone());

        let failure = serve_quote(&state, Deadline::none()).await.unwrap_err();
        assert_eq!(failure.stage, Stage::StoreInsert);
        assert!(matches!(failure.error, QuoteError::StoreWrite(_)));
        assert!(store.rows.lock().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn store_budget_ignores_request_budget() {
        // 195 ms of the 200 ms budget go to the upstream; the insert still gets 10 ms.
        let store = Arc::new(MemoryStore {
            delay: Duration::from_millis(8),
            ..Default::default()
        });
        let mut provider = CannedProvider::new(GOOD);
        provider.delay = Duration::from_millis(195);
        let state = state(Arc::new(provider), store.clone());

        let resp = serve_quote(&state, Deadline::none().child(REQUEST_BUDGET)).await.unwrap();
        assert_eq!(resp.bid, "5.43");
    }

    #[tokio::test(start_paused = true)]
    async fn rejected_insert_is_store_write_error() {
        let store = Arc::new(MemoryStore {
            reject: true,
            ..Default::default()
        });
        let provider = Arc::new(CannedProvider::new(GOOD));
        let state = state(provider, store);

        let failure = serve_quote(&state, Deadline::none()).await.unwrap_err();
        assert_eq!(failure.stage, Stage::StoreInsert);
        assert_eq!(failure.error.to_string(), "Store write error: disk I/O error");
    }
}
