//! Composite health-check service library.

// Core subsystems
pub mod config;
pub mod health;
pub mod http;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;
pub mod resilience;

pub use config::AppConfig;
pub use health::{AggregateHealth, HealthAggregator, Probe, ProbeResult};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
