//! Gemgauge - package quality metrics for the GemHub registry
//!
//! Ingests benchmark and vulnerability scan results, scores packages,
//! and publishes quality reports.

use anyhow::Result;
use clap::Parser;
use gemgauge::cli;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    // Parse CLI args and run
    let cli = cli::Cli::parse();
    cli::run(cli)
}
