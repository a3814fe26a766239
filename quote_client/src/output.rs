//! Quote file written by the requester.
use std::path::Path;

use quote_common::{QuoteError, Result};

/// File written next to the working directory on success.
pub const DEFAULT_OUTPUT_PATH: &str = "cotacao.txt";

/// Text stored in the quote file for `bid`.
pub fn format_quote(bid: &str) -> String {
    format!("Dólar: {}", bid)
}

/// Overwrite `path` with the formatted quote.
pub fn write_quote_file(path: &Path, bid: &str) -> Result<()> {
    std::fs::write(path, format_quote(bid)).map_err(QuoteError::FileWrite)
}
