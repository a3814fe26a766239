//! Quote Client library.
//!
//! Asks the quote service for the current USD→BRL bid under a 300 ms deadline
//! and stores it as `Dólar: <bid>` in `cotacao.txt`.
//!
//! - `requester` — the bounded GET and response decoding.
//! - `output` — formatting and writing the quote file.
#![warn(missing_docs)]
use std::path::Path;
use std::time::Duration;

use log::info;
use quote_common::Result;

pub mod output;
pub mod requester;

/// Fetch the bid and write it to `output_path`.
///
/// Nothing is written unless the fetch succeeds.
pub async fn run(base_url: &str, max_wait: Duration, output_path: &Path) -> Result<String> {
    let bid = requester::fetch_quote(base_url, max_wait).await?;
    output::write_quote_file(output_path, &bid)?;
    info!("Wrote {}", output_path.display());
    Ok(bid)
}
