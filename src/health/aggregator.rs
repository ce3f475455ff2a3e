//! Aggregate health evaluation.
//!
//! # Responsibilities
//! - Run every registered probe, one at a time, in registration order
//! - Collect each result into the response, whatever its outcome
//! - Derive the aggregate status and cause
//!
//! # Design Decisions
//! - Sequential: each probe completes before the next starts, so worst-case
//!   latency is the sum of probe latencies
//! - The cause names the *last* down dependency seen
//! - Aggregation cannot fail; probes own their error handling

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::health::probe::Probe;
use crate::health::types::{dependency_down_cause, AggregateHealth, ProbeResult, Status};
use crate::observability::metrics;
use crate::resilience::timeouts::with_deadline;

/// Condition cause reported when a probe exceeds its deadline.
pub const PROBE_TIMEOUT_CAUSE: &str = "probe timed out";

/// Runs a fixed, ordered set of probes and combines their results.
#[derive(Clone, Default)]
pub struct HealthAggregator {
    probes: Vec<Arc<dyn Probe>>,
    probe_timeout: Option<Duration>,
}

impl HealthAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a probe. Results appear in registration order.
    pub fn with_probe<P: Probe + 'static>(mut self, probe: P) -> Self {
        self.probes.push(Arc::new(probe));
        self
    }

    /// Bound each probe invocation. `None` waits indefinitely.
    pub fn with_probe_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.probe_timeout = timeout;
        self
    }

    pub fn probe_names(&self) -> Vec<&str> {
        self.probes.iter().map(|p| p.name()).collect()
    }

    /// Evaluate all probes and build the aggregate report.
    pub async fn aggregate(&self) -> AggregateHealth {
        let mut status = Status::Up;
        let mut cause = String::new();
        let mut services = Vec::with_capacity(self.probes.len());

        for probe in &self.probes {
            let result = self.run_probe(probe.as_ref()).await;

            if result.status == Status::Down {
                status = Status::Down;
                cause = dependency_down_cause(&result.name);
            }

            services.push(result);
        }

        metrics::record_aggregate(status);

        let cause = if status.is_up() {
            None
        } else {
            tracing::warn!(cause = %cause, "Aggregate health is down");
            Some(cause)
        };

        AggregateHealth {
            status,
            services,
            cause,
        }
    }

    async fn run_probe(&self, probe: &dyn Probe) -> ProbeResult {
        let start = Instant::now();

        let result = match with_deadline(self.probe_timeout, probe.check()).await {
            Ok(result) => result,
            Err(_) => ProbeResult::down(probe.name(), PROBE_TIMEOUT_CAUSE),
        };

        let elapsed = start.elapsed();
        metrics::record_probe(&result.name, result.status, elapsed);

        match result.condition.cause() {
            None => tracing::debug!(
                probe = %result.name,
                status = %result.status,
                elapsed_ms = elapsed.as_millis() as u64,
                "Probe healthy"
            ),
            Some(cause) => tracing::warn!(
                probe = %result.name,
                status = %result.status,
                cause = %cause,
                elapsed_ms = elapsed.as_millis() as u64,
                "Probe unhealthy"
            ),
        }

        result
    }
}
