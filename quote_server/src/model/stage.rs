//! Linear request stages of `GET /cotacao`.
//!
//! A request walks `DeadlineCheck → UpstreamFetch → Parse → StoreInsert → Respond`.
//! Any stage may fail; the failure carries the stage so the response message and
//! the log line both say where the request stopped.
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::error;
use quote_common::QuoteError;
use strum_macros::Display;
use thiserror::Error;

/// Processing stage of a single request.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Stage {
    DeadlineCheck,
    UpstreamFetch,
    Parse,
    StoreInsert,
    Respond,
}

impl Stage {
    /// Short plain-text message returned to the client when this stage fails.
    pub fn failure_message(&self) -> &'static str {
        match self {
            Stage::DeadlineCheck => "Timeout ao buscar cotação do dólar",
            Stage::UpstreamFetch => "Erro ao buscar cotação do dólar",
            Stage::Parse => "Erro ao decodificar JSON da API",
            Stage::StoreInsert => "Erro ao inserir no banco de dados",
            Stage::Respond => "Erro ao codificar a resposta",
        }
    }
}

/// Terminal `Failed(kind)` state of a request.
#[derive(Debug, Error)]
#[error("{stage} failed: {error}")]
pub struct StageFailure {
    /// Stage the request was in.
    pub stage: Stage,
    /// What went wrong.
    #[source]
    pub error: QuoteError,
}

impl StageFailure {
    /// Attach `stage` to `error`.
    pub fn new(stage: Stage, error: QuoteError) -> Self {
        Self { stage, error }
    }

    /// Closure adapter for `map_err`.
    pub fn at(stage: Stage) -> impl FnOnce(QuoteError) -> Self {
        move |error| Self::new(stage, error)
    }
}

impl IntoResponse for StageFailure {
    fn into_response(self) -> Response {
        error!("{}", self);
        (StatusCode::INTERNAL_SERVER_ERROR, self.stage.failure_message()).into_response()
    }
}
