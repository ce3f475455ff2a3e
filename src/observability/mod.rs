//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Probes and the aggregator produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (histograms, gauges, counters)
//!
//! Consumers:
//!     → Log aggregation (stdout, pretty or JSON)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Request ID is attached to every request span
//! - Metrics are cheap and safe to record without an exporter

pub mod logging;
pub mod metrics;
