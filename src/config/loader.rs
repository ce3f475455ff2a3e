//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::AppConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable overriding `database.url`.
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse, apply environment overrides, and validate a TOML document.
pub fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    let mut config: AppConfig = toml::from_str(content)?;
    apply_env_overrides(&mut config, std::env::var(DATABASE_URL_ENV).ok());
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Defaults plus environment overrides, validated. Used when no file is given.
pub fn default_config() -> Result<AppConfig, ConfigError> {
    let mut config = AppConfig::default();
    apply_env_overrides(&mut config, std::env::var(DATABASE_URL_ENV).ok());
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

fn apply_env_overrides(config: &mut AppConfig, database_url: Option<String>) {
    if let Some(url) = database_url.filter(|u| !u.is_empty()) {
        config.database.url = url;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::LogFormat;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [listener]
            bind_address = "127.0.0.1:3000"

            [health]
            probe_timeout_ms = 1500

            [observability]
            log_format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.listener.bind_address, "127.0.0.1:3000");
        assert_eq!(config.health.path, "/health");
        assert_eq!(config.health.probe_timeout_ms, Some(1500));
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.observability.log_format, LogFormat::Json);
    }

    #[test]
    fn test_env_override_replaces_url() {
        let mut config = AppConfig::default();
        apply_env_overrides(&mut config, Some("postgres://app@db:5432/app".into()));
        assert_eq!(config.database.url, "postgres://app@db:5432/app");

        apply_env_overrides(&mut config, Some(String::new()));
        assert_eq!(config.database.url, "postgres://app@db:5432/app");
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let err = toml::from_str::<AppConfig>("listener = 3").unwrap_err();
        assert!(matches!(ConfigError::from(err), ConfigError::Parse(_)));
    }

    #[test]
    fn test_validation_error_message_lists_all() {
        let err = ConfigError::Validation(vec![
            ValidationError::InvalidDatabaseUrl,
            ValidationError::MustBePositive("database.max_connections"),
        ]);
        let msg = err.to_string();
        assert!(msg.starts_with("Validation failed: "));
        assert!(msg.contains("database.url"));
        assert!(msg.contains("database.max_connections"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_config(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
