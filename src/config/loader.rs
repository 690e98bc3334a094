//! Configuration loading from disk.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::AppConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    let config: AppConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_config() {
        let config = parse_config(
            r#"
            [pricing]
            currency = "USD"

            [admin]
            api_key = "secret"
            "#,
        )
        .unwrap();
        assert_eq!(config.pricing.currency, "USD");
        assert_eq!(config.admin.api_key, "secret");
    }

    #[test]
    fn test_example_config_matches_defaults() {
        let config = parse_config(include_str!("../../companion.example.toml")).unwrap();
        let defaults = AppConfig::default();
        assert_eq!(config.routes.admin, defaults.routes.admin);
        assert_eq!(config.routes.common, defaults.routes.common);
        assert_eq!(config.routes.auth, defaults.routes.auth);
        assert_eq!(config.dashboards.fallback, "/");
    }

    #[test]
    fn test_validation_errors_are_joined() {
        let err = parse_config(
            r#"
            [listener]
            bind_address = ""

            [timeouts]
            request_secs = 0
            "#,
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation failed: listener.bind_address must not be empty, \
             timeouts.request_secs must be greater than zero"
        );
    }

    #[test]
    fn test_parse_error() {
        let err = parse_config("listener = 5").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/nonexistent/companion.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
