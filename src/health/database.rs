//! Relational database probe.
//!
//! # Responsibilities
//! - Issue one read-only diagnostic query against `pg_stat_statements`
//! - Map its outcome (row, no row, error) onto a [`ProbeResult`]
//!
//! # Design Decisions
//! - The query capability is injected through [`StatsSource`] so tests can
//!   substitute fakes for the shared pool
//! - An empty statistics view keeps `status: up` with an unhealthy condition,
//!   separating degraded telemetry from an outage

use async_trait::async_trait;
use sqlx::PgPool;

use crate::health::probe::Probe;
use crate::health::types::ProbeResult;

pub const DATABASE_PROBE_NAME: &str = "database";
pub const NO_STATS_CAUSE: &str = "no stats";
pub const QUERY_FAILED_CAUSE: &str = "unable to execute queries";

/// Statement with the highest average execution time.
const SLOWEST_STATEMENT_SQL: &str = r#"
    SELECT (total_time / 1000 / 60) AS total_time,
           (total_time / calls)     AS avg_time,
           query
    FROM pg_stat_statements
    ORDER BY 2 DESC
    LIMIT 1
"#;

/// One row of query statistics.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct StatementStats {
    /// Cumulative execution time in minutes.
    pub total_time: f64,
    /// Average execution time per call in milliseconds.
    pub avg_time: f64,
    pub query: Option<String>,
}

/// Source of database query statistics.
#[async_trait]
pub trait StatsSource: Send + Sync {
    async fn slowest_statement(&self) -> Result<Option<StatementStats>, sqlx::Error>;
}

#[async_trait]
impl StatsSource for PgPool {
    async fn slowest_statement(&self) -> Result<Option<StatementStats>, sqlx::Error> {
        sqlx::query_as::<_, StatementStats>(SLOWEST_STATEMENT_SQL)
            .fetch_optional(self)
            .await
    }
}

/// Probe reporting the health of the relational database.
pub struct DatabaseProbe<S> {
    source: S,
}

impl<S: StatsSource> DatabaseProbe<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }
}

#[async_trait]
impl<S: StatsSource> Probe for DatabaseProbe<S> {
    fn name(&self) -> &str {
        DATABASE_PROBE_NAME
    }

    async fn check(&self) -> ProbeResult {
        match self.source.slowest_statement().await {
            Ok(Some(stats)) => {
                tracing::debug!(
                    avg_time_ms = stats.avg_time,
                    total_time_min = stats.total_time,
                    "Slowest statement sampled"
                );
                ProbeResult::healthy(DATABASE_PROBE_NAME)
            }
            Ok(None) => ProbeResult::degraded(DATABASE_PROBE_NAME, NO_STATS_CAUSE),
            Err(e) => {
                tracing::warn!(error = %e, "Database statistics query failed");
                ProbeResult::down(DATABASE_PROBE_NAME, QUERY_FAILED_CAUSE)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::types::{Condition, Status};

    enum FakeStats {
        Row,
        Empty,
        Fail,
    }

    #[async_trait]
    impl StatsSource for FakeStats {
        async fn slowest_statement(&self) -> Result<Option<StatementStats>, sqlx::Error> {
            match self {
                FakeStats::Row => Ok(Some(StatementStats {
                    total_time: 1.5,
                    avg_time: 12.0,
                    query: Some("SELECT 1".into()),
                })),
                FakeStats::Empty => Ok(None),
                FakeStats::Fail => Err(sqlx::Error::PoolTimedOut),
            }
        }
    }

    #[tokio::test]
    async fn test_row_is_healthy() {
        let result = DatabaseProbe::new(FakeStats::Row).check().await;
        assert_eq!(result.name, "database");
        assert_eq!(result.status, Status::Up);
        assert_eq!(result.condition, Condition::Healthy);
        assert_eq!(result.condition.cause(), None);
    }

    #[tokio::test]
    async fn test_empty_stats_is_up_but_unhealthy() {
        let result = DatabaseProbe::new(FakeStats::Empty).check().await;
        assert_eq!(result.status, Status::Up);
        assert_eq!(result.condition, Condition::unhealthy("no stats"));
    }

    #[tokio::test]
    async fn test_query_error_is_down() {
        let result = DatabaseProbe::new(FakeStats::Fail).check().await;
        assert_eq!(result.status, Status::Down);
        assert_eq!(result.condition, Condition::unhealthy("unable to execute queries"));
    }

    #[tokio::test]
    async fn test_unreachable_pool_is_down() {
        let pool = sqlx::postgres::PgPoolOptions::new()
            .acquire_timeout(std::time::Duration::from_millis(200))
            .connect_lazy("postgres://nobody@127.0.0.1:1/none")
            .unwrap();

        let result = DatabaseProbe::new(pool).check().await;
        assert_eq!(result, ProbeResult::down("database", QUERY_FAILED_CAUSE));
    }
}
