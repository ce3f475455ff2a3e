//! Structured logging.
//!
//! # Responsibilities
//! - Initialize logging subsystem
//! - Select output format (pretty or JSON)
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - `RUST_LOG` wins over the configured level

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogFormat, ObservabilityConfig};

/// Filter used when `RUST_LOG` is not set.
pub fn default_filter(level: &str) -> String {
    let level = level.to_ascii_lowercase();
    format!("health_aggregator={level},tower_http={level},sqlx=warn")
}

/// Install the global subscriber.
pub fn init_logging(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter(&config.log_level).into());

    let registry = tracing_subscriber::registry().with(filter);
    match config.log_format {
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_uses_level() {
        let filter = default_filter("DEBUG");
        assert_eq!(filter, "health_aggregator=debug,tower_http=debug,sqlx=warn");
        assert!(filter.parse::<EnvFilter>().is_ok());
    }
}
