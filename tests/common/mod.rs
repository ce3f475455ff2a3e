//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::time::Duration;

use async_trait::async_trait;
use health_aggregator::config::AppConfig;
use health_aggregator::health::{StatementStats, StatsSource};
use health_aggregator::{HealthAggregator, HttpServer, Shutdown};
use tokio::net::TcpListener;

/// Database statistics source with a scripted outcome.
pub enum FakeDatabase {
    Healthy,
    NoStats,
    Outage,
}

#[async_trait]
impl StatsSource for FakeDatabase {
    async fn slowest_statement(&self) -> Result<Option<StatementStats>, sqlx::Error> {
        match self {
            FakeDatabase::Healthy => Ok(Some(StatementStats {
                total_time: 0.25,
                avg_time: 3.5,
                query: Some("SELECT * FROM users WHERE id = $1".into()),
            })),
            FakeDatabase::NoStats => Ok(None),
            FakeDatabase::Outage => Err(sqlx::Error::PoolClosed),
        }
    }
}

/// Start the server on an ephemeral port. Returns its address and the
/// coordinator that stops it.
pub async fn start_server(aggregator: HealthAggregator) -> (SocketAddr, Shutdown) {
    let mut config = AppConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.observability.metrics_enabled = false;

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, aggregator);
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    (addr, shutdown)
}
