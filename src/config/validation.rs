//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, pool size > 0)
//! - Check addresses, URL scheme and route shape
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::AppConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: invalid socket address '{value}'")]
    InvalidAddress { field: &'static str, value: String },

    #[error("database.url: expected a postgres:// or postgresql:// URL")]
    InvalidDatabaseUrl,

    #[error("{0}: must be greater than zero")]
    MustBePositive(&'static str),

    #[error("health.path: must start with '/', got '{0}'")]
    InvalidPath(String),

    #[error("observability.log_level: unknown level '{0}'")]
    UnknownLogLevel(String),
}

pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_address(&mut errors, "listener.bind_address", &config.listener.bind_address);

    let url = config.database.url.as_str();
    if !(url.starts_with("postgres://") || url.starts_with("postgresql://")) {
        errors.push(ValidationError::InvalidDatabaseUrl);
    }
    if config.database.max_connections == 0 {
        errors.push(ValidationError::MustBePositive("database.max_connections"));
    }
    if config.database.acquire_timeout_secs == 0 {
        errors.push(ValidationError::MustBePositive("database.acquire_timeout_secs"));
    }

    if !config.health.path.starts_with('/') {
        errors.push(ValidationError::InvalidPath(config.health.path.clone()));
    }
    if config.health.probe_timeout_ms == Some(0) {
        errors.push(ValidationError::MustBePositive("health.probe_timeout_ms"));
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::UnknownLogLevel(
            config.observability.log_level.clone(),
        ));
    }
    if config.observability.metrics_enabled {
        check_address(
            &mut errors,
            "observability.metrics_address",
            &config.observability.metrics_address,
        );
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_address(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field,
            value: value.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(validate_config(&AppConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_every_error() {
        let mut config = AppConfig::default();
        config.listener.bind_address = "nowhere".into();
        config.database.url = "mysql://localhost/db".into();
        config.database.max_connections = 0;
        config.health.path = "health".into();
        config.health.probe_timeout_ms = Some(0);
        config.observability.log_level = "loud".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 6);
        assert!(errors.contains(&ValidationError::InvalidDatabaseUrl));
        assert!(errors.contains(&ValidationError::MustBePositive("health.probe_timeout_ms")));
        assert!(errors.contains(&ValidationError::InvalidPath("health".into())));
    }

    #[test]
    fn test_metrics_address_ignored_when_disabled() {
        let mut config = AppConfig::default();
        config.observability.metrics_enabled = false;
        config.observability.metrics_address = "bogus".into();
        assert!(validate_config(&config).is_ok());
    }
}
