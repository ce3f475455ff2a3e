//! The probe capability.

use async_trait::async_trait;

use crate::health::types::ProbeResult;

/// Checks the health of one dependency.
///
/// Implementations must absorb their own failures and report them as a
/// `down` [`ProbeResult`]; `check` has no error channel.
#[async_trait]
pub trait Probe: Send + Sync {
    /// Dependency name, used for logs, metrics and timeout reports.
    fn name(&self) -> &str;

    async fn check(&self) -> ProbeResult;
}
