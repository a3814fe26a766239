//! Quote Client — asks the local quote service for the current dollar quote and
//! saves it to a text file.
//!
//! One GET is made to `/cotacao` with a 300 ms deadline. On success the bid is
//! written as `Dólar: <bid>` to `cotacao.txt` (overwriting it) and a message is
//! printed. On any failure the error is logged, no file is written, and the
//! process still exits normally.
//!
//! Usage example (CLI):
//! ```bash
//! quote_client
//! quote_client --server-url http://192.168.0.10:8080 --output ./cotacao.txt
//! ```
#![warn(missing_docs)]
mod args;

use crate::args::Args;
use clap::Parser;
use log::error;
use quote_client::requester::MAX_WAIT;
use quote_common::QuoteError;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_logger();
    let args = Args::parse();

    match quote_client::run(&args.server_url, MAX_WAIT, &args.output).await {
        Ok(bid) => println!(
            "Cotação do dólar salva em '{}': {}",
            args.output.display(),
            bid
        ),
        Err(QuoteError::Timeout(_)) => {
            error!("Quote service did not answer within {:?}", MAX_WAIT)
        }
        Err(e) => error!("Failed to save dollar quote: {}", e),
    }
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
