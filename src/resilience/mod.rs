//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Probe invocation:
//!     → timeouts.rs (optional per-probe deadline)
//!     → expiry reported as a `down` result by the aggregator
//! ```
//!
//! # Design Decisions
//! - Probes are never retried; a single attempt per request
//! - The deadline is off by default so a slow dependency is waited on

pub mod timeouts;
