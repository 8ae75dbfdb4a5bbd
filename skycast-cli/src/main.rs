//! Binary crate for the `skycast` terminal weather tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - The interactive city view with type-ahead search
//! - Human-friendly output formatting

use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod app;
mod cli;
mod render;
mod search;

// Prompts and panels own stdout, so logs always go to stderr.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
