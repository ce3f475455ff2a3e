//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Expose a Prometheus-compatible scrape endpoint
//! - Record per-probe latency and status
//! - Count aggregate health evaluations
//!
//! # Metrics
//! - `health_probe_duration_seconds` (histogram): probe latency by probe
//! - `health_probe_up` (gauge): 1=up, 0=down, by probe
//! - `health_checks_total` (counter): aggregate evaluations by status
//!
//! # Design Decisions
//! - Recording goes through the `metrics` facade; without an installed
//!   recorder every call is a no-op

use std::net::SocketAddr;
use std::time::Duration;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::health::Status;

/// Install the Prometheus recorder and its HTTP listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record the outcome of one probe run.
pub fn record_probe(probe: &str, status: Status, elapsed: Duration) {
    metrics::histogram!("health_probe_duration_seconds", "probe" => probe.to_string())
        .record(elapsed.as_secs_f64());
    metrics::gauge!("health_probe_up", "probe" => probe.to_string())
        .set(if status.is_up() { 1.0 } else { 0.0 });
}

/// Record one aggregate health evaluation.
pub fn record_aggregate(status: Status) {
    metrics::counter!("health_checks_total", "status" => status.as_str()).increment(1);
}
