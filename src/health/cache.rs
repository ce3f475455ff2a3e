//! Cache probe.

use async_trait::async_trait;

use crate::health::probe::Probe;
use crate::health::types::ProbeResult;

pub const CACHE_PROBE_NAME: &str = "redis";

/// Placeholder probe for the cache.
///
/// Always reports up and healthy without contacting the cache.
// TODO: replace with a PING round-trip once a cache client is wired into startup.
#[derive(Debug, Clone, Copy, Default)]
pub struct CacheProbe;

#[async_trait]
impl Probe for CacheProbe {
    fn name(&self) -> &str {
        CACHE_PROBE_NAME
    }

    async fn check(&self) -> ProbeResult {
        ProbeResult::healthy(CACHE_PROBE_NAME)
    }
}
