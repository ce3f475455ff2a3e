//! Composite health-check service.
//!
//! Aggregates the health of the services this application depends on into a
//! single `GET /health` report.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client                ┌──────────────────────────────────────────────┐
//!     ──────── GET /health ─┼─▶ http ──▶ health::aggregator               │
//!                           │                 │ (sequential, in order)     │
//!                           │                 ├─▶ database ──▶ PostgreSQL  │
//!                           │                 ├─▶ redis (placeholder)      │
//!                           │                 └─▶ third-party (placeholder)│
//!     ◀─── 200 + JSON ──────┼── AggregateHealth                            │
//!                           │                                              │
//!                           │  config · observability · lifecycle          │
//!                           └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use health_aggregator::config::{default_config, load_config};
use health_aggregator::lifecycle::{startup, Shutdown};
use health_aggregator::observability::logging;

#[derive(Parser)]
#[command(name = "health-aggregator")]
#[command(about = "Composite health-check endpoint", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => default_config()?,
    };

    logging::init_logging(&config.observability);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config = ?cli.config,
        bind_address = %config.listener.bind_address,
        probe_timeout_ms = ?config.health.probe_timeout_ms,
        "health-aggregator starting"
    );

    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();

    startup::run(config, &shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
