//! Command-line arguments for the Quote Service.
//!
//! Every flag has a default, so running the binary bare listens on port 8080,
//! writes `cotacoes.db` in the working directory, and calls the public rates API.
use clap::Parser;
use quote_common::net::{addr, SERVICE_PORT};
use quote_server::store::DEFAULT_DB_PATH;
use quote_server::upstream::DEFAULT_UPSTREAM_URL;
use std::path::PathBuf;

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(
    version,
    about = "USD-BRL quote service. Run without flags it uses the fixed production \
             defaults; the flags only override them for local testing.",
    long_about = None
)]
pub struct Args {
    /// Address the HTTP listener binds to.
    #[clap(long, default_value_t = addr("0.0.0.0", SERVICE_PORT))]
    pub bind: String,

    /// SQLite database file.
    #[clap(long, default_value = DEFAULT_DB_PATH)]
    pub db_path: PathBuf,

    /// Upstream URL returning the latest USD-BRL quote.
    #[clap(long, default_value = DEFAULT_UPSTREAM_URL)]
    pub upstream_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn bare_invocation_uses_production_defaults() {
        let args = Args::try_parse_from(["quote_server"]).unwrap();
        assert_eq!(args.bind, "0.0.0.0:8080");
        assert_eq!(args.db_path, PathBuf::from("cotacoes.db"));
        assert_eq!(args.upstream_url, DEFAULT_UPSTREAM_URL);
    }

    #[test]
    fn help_says_flags_only_override_defaults() {
        let help = Args::command().render_help().to_string();
        assert!(help.contains("fixed production defaults"), "{help}");
        assert!(help.contains("local testing"), "{help}");
    }
}
