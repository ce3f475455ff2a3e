//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the shared database pool from configuration
//! - Register probes in their fixed order
//! - Start the metrics exporter, bind the listener, serve
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - The pool connects lazily; a database outage at boot is reported by the
//!   endpoint rather than preventing startup
//! - Collaborators are passed in explicitly, never held in globals

use std::net::SocketAddr;

use sqlx::postgres::{PgPool, PgPoolOptions};
use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::{AppConfig, DatabaseConfig};
use crate::health::{CacheProbe, DatabaseProbe, HealthAggregator, ThirdPartyProbe};
use crate::http::HttpServer;
use crate::lifecycle::Shutdown;
use crate::observability::metrics;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Invalid database configuration: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Invalid address '{0}'")]
    Address(String),

    #[error("Failed to start metrics exporter: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Create the process-wide pool without opening a connection.
pub fn connect_pool(config: &DatabaseConfig) -> Result<PgPool, StartupError> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .connect_lazy(&config.url)?;
    Ok(pool)
}

/// Register the probes: database, redis, third-party, in that order.
pub fn build_aggregator(config: &AppConfig, pool: PgPool) -> HealthAggregator {
    HealthAggregator::new()
        .with_probe(DatabaseProbe::new(pool))
        .with_probe(CacheProbe)
        .with_probe(ThirdPartyProbe)
        .with_probe_timeout(config.health.probe_timeout())
}

/// Start every subsystem and serve until `shutdown` fires.
pub async fn run(config: AppConfig, shutdown: &Shutdown) -> Result<(), StartupError> {
    if config.observability.metrics_enabled {
        let addr = parse_addr(&config.observability.metrics_address)?;
        metrics::init_metrics(addr)?;
    }

    let pool = connect_pool(&config.database)?;
    let aggregator = build_aggregator(&config, pool);
    tracing::info!(probes = ?aggregator.probe_names(), "Probes registered");

    let addr = parse_addr(&config.listener.bind_address)?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let server = HttpServer::new(config, aggregator);
    server.run(listener, shutdown.subscribe()).await?;
    Ok(())
}

fn parse_addr(value: &str) -> Result<SocketAddr, StartupError> {
    value
        .parse()
        .map_err(|_| StartupError::Address(value.to_string()))
}
