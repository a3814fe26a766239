//! Command-line arguments for the Quote Client.
//!
//! This module defines the CLI interface using `clap`. Both flags default to the
//! fixed local setup, so the client is normally run without arguments.
use clap::Parser;
use quote_client::output::DEFAULT_OUTPUT_PATH;
use quote_client::requester::DEFAULT_SERVER_URL;
use std::path::PathBuf;

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(
    version,
    about = "Fetches the USD-BRL bid and writes it to a file. Run without flags it \
             uses the fixed production defaults; the flags only override them for \
             local testing.",
    long_about = None
)]
pub struct Args {
    /// Base URL of the quote service.
    #[clap(long, default_value = DEFAULT_SERVER_URL)]
    pub server_url: String,

    /// File the quote is written to (overwritten on every successful run).
    #[clap(long, default_value = DEFAULT_OUTPUT_PATH)]
    pub output: PathBuf,
}
