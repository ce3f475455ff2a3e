//! Health checking subsystem.
//!
//! # Data Flow
//! ```text
//! GET /health
//!     → aggregator.rs (runs probes in registration order)
//!         → database.rs    (pg_stat_statements lookup)
//!         → cache.rs       (placeholder, always healthy)
//!         → third_party.rs (placeholder, always healthy)
//!     → types.rs (AggregateHealth serialized as the body)
//! ```
//!
//! # Design Decisions
//! - Every probe implements the `Probe` trait; real checks replace the
//!   placeholders without touching the aggregator
//! - Probes absorb their own errors; aggregation never fails
//! - Results are built per request and never stored

pub mod aggregator;
pub mod cache;
pub mod database;
pub mod probe;
pub mod third_party;
pub mod types;

pub use aggregator::HealthAggregator;
pub use cache::CacheProbe;
pub use database::{DatabaseProbe, StatementStats, StatsSource};
pub use probe::Probe;
pub use third_party::ThirdPartyProbe;
pub use types::{AggregateHealth, Condition, ProbeResult, Status};
