//! Loadcast CLI - batch CPU-usage forecasting and accuracy evaluation.
//!
//! This binary iterates a directory of per-workload CSV time series, fits a
//! forecasting model per workload, renders observed-vs-predicted charts, and
//! writes a single accuracy report.

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use loadcast_cli::Cli;

fn main() -> Result<()> {
    // Initialize tracing subscriber with environment filter
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::from_default_env()
                .add_directive("loadcast_core=info".parse()?)
                .add_directive("loadcast_cli=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    info!("loadcast starting...");
    cli.run()?;
    info!("loadcast completed successfully");

    Ok(())
}
