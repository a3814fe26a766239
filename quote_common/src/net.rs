//! Shared networking constants and helpers used by client and server.

/// TCP port the quote service listens on.
pub const SERVICE_PORT: u16 = 8080;
/// Path of the only endpoint exposed by the quote service.
pub const QUOTE_PATH: &str = "/cotacao";
/// Header carrying the caller's remaining budget in whole milliseconds.
///
/// The service derives its own per-request deadline from this value, so an
/// inbound deadline that is already partly spent shortens the server budget.
pub const DEADLINE_HEADER: &str = "x-request-deadline-ms";

/// Helper to format an address with a port like "ip:port".
pub fn addr(ip: &str, port: u16) -> String {
    format!("{}:{}", ip, port)
}

/// Joins a base URL (with or without a trailing slash) and the quote path.
pub fn quote_url(base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), QUOTE_PATH)
}
