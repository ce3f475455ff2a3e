//! Third-party connection probe.

use async_trait::async_trait;

use crate::health::probe::Probe;
use crate::health::types::ProbeResult;

pub const THIRD_PARTY_PROBE_NAME: &str = "third-party";

/// Placeholder probe for the third-party connection; always up and healthy.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThirdPartyProbe;

#[async_trait]
impl Probe for ThirdPartyProbe {
    fn name(&self) -> &str {
        THIRD_PARTY_PROBE_NAME
    }

    async fn check(&self) -> ProbeResult {
        ProbeResult::healthy(THIRD_PARTY_PROBE_NAME)
    }
}
