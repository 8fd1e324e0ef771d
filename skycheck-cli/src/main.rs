//! Binary crate for the `skycheck` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive lookup sessions
//! - Human-friendly output formatting

use clap::Parser;

mod cli;
mod render;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logging is opt-in via RUST_LOG so it never interleaves with prompts.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
