//! Entry point for modelgate.
//!
//! This binary loads environment variables, parses CLI arguments via [`cli`],
//! sets up logging and dispatches to the appropriate subcommand handler.

mod cli;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Logs go to stderr so they never mix with streamed model output.
/// `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = cli::parse();
    init_logging(cli.verbose);
    cli::run(cli).await
}
