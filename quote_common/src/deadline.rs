//! Explicit deadlines passed across call boundaries.
//!
//! A `Deadline` is an optional absolute expiry instant. Each hop of the quote
//! chain either derives its deadline from the caller's (`child`, which can only
//! shorten it) or starts a fresh, independent one (`after`). Awaiting work under
//! a deadline goes through [`Deadline::run`], which abandons the future once the
//! instant passes.
//!
//! Instants come from `tokio::time` so tests can drive them with a paused clock.
use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;

use crate::error::QuoteError;
use crate::result::Result;

/// Maximum wait attached to an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    expires_at: Option<Instant>,
}

impl Deadline {
    /// A deadline that never expires.
    pub fn none() -> Self {
        Self { expires_at: None }
    }

    /// A fresh deadline `budget` from now, unrelated to any caller.
    pub fn after(budget: Duration) -> Self {
        Self {
            expires_at: Some(Instant::now() + budget),
        }
    }

    /// A deadline at a fixed instant.
    pub fn at(instant: Instant) -> Self {
        Self {
            expires_at: Some(instant),
        }
    }

    /// Derive a deadline for a nested operation: `budget` from now, but never
    /// later than `self`.
    pub fn child(&self, budget: Duration) -> Self {
        let own = Instant::now() + budget;
        let expires_at = match self.expires_at {
            Some(parent) => parent.min(own),
            None => own,
        };
        Self {
            expires_at: Some(expires_at),
        }
    }

    /// Expiry instant, `None` when unbounded.
    pub fn expires_at(&self) -> Option<Instant> {
        self.expires_at
    }

    /// Time left before expiry; zero once expired, `None` when unbounded.
    pub fn remaining(&self) -> Option<Duration> {
        self.expires_at
            .map(|at| at.saturating_duration_since(Instant::now()))
    }

    /// `true` once the expiry instant has been reached.
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|at| Instant::now() >= at)
    }

    /// Await `fut`, giving up with `QuoteError::Timeout` once the deadline
    /// passes. `what` names the operation in the error message.
    pub async fn run<F>(&self, what: &str, fut: F) -> Result<F::Output>
    where
        F: Future,
    {
        match self.expires_at {
            Some(at) => tokio::time::timeout_at(at, fut)
                .await
                .map_err(|_| QuoteError::Timeout(what.to_string())),
            None => Ok(fut.await),
        }
    }
}
