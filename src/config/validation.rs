//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check that every route pattern compiles
//! - Check that dashboard targets are absolute paths
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use regex::Regex;
use thiserror::Error;

use crate::config::schema::{AppConfig, RouteRules};

/// A single semantic problem in a configuration file.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address must not be empty")]
    EmptyBindAddress,

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroTimeout,

    #[error("routes.{table}: invalid pattern '{pattern}': {reason}")]
    InvalidPattern {
        table: &'static str,
        pattern: String,
        reason: String,
    },

    #[error("routes.{table}: exact route '{path}' must start with '/'")]
    RelativeRoute { table: &'static str, path: String },

    #[error("routes.common only supports exact routes")]
    CommonPatterns,

    #[error("dashboards.{name}: '{path}' must start with '/'")]
    RelativeDashboard { name: &'static str, path: String },

    #[error("admin.api_key must be set when admin endpoints are enabled")]
    MissingApiKey,
}

/// Validate a parsed configuration.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.trim().is_empty() {
        errors.push(ValidationError::EmptyBindAddress);
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    let routes = &config.routes;
    check_rules("admin", &routes.admin, &mut errors);
    check_rules("moderator", &routes.moderator, &mut errors);
    check_rules("user", &routes.user, &mut errors);
    check_rules("common", &routes.common, &mut errors);
    if !routes.common.patterns.is_empty() {
        errors.push(ValidationError::CommonPatterns);
    }
    for path in &routes.auth {
        if !path.starts_with('/') {
            errors.push(ValidationError::RelativeRoute {
                table: "auth",
                path: path.clone(),
            });
        }
    }

    let dashboards = &config.dashboards;
    for (name, path) in [
        ("admin", &dashboards.admin),
        ("moderator", &dashboards.moderator),
        ("user", &dashboards.user),
        ("fallback", &dashboards.fallback),
        ("login", &dashboards.login),
    ] {
        if !path.starts_with('/') {
            errors.push(ValidationError::RelativeDashboard {
                name,
                path: path.clone(),
            });
        }
    }

    if config.admin.enabled && config.admin.api_key.trim().is_empty() {
        errors.push(ValidationError::MissingApiKey);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_rules(table: &'static str, rules: &RouteRules, errors: &mut Vec<ValidationError>) {
    for path in &rules.exact {
        if !path.starts_with('/') {
            errors.push(ValidationError::RelativeRoute {
                table,
                path: path.clone(),
            });
        }
    }
    for pattern in &rules.patterns {
        if let Err(e) = Regex::new(pattern) {
            errors.push(ValidationError::InvalidPattern {
                table,
                pattern: pattern.clone(),
                reason: e.to_string(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&AppConfig::default()), Ok(()));
    }

    #[test]
    fn test_collects_every_error() {
        let mut config = AppConfig::default();
        config.listener.bind_address = String::new();
        config.routes.admin.patterns.push("^/admin(".to_string());
        config.routes.common.patterns.push("^/shared".to_string());
        config.dashboards.user = "dashboard".to_string();
        config.admin.api_key = " ".to_string();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 5);
        assert!(errors.contains(&ValidationError::EmptyBindAddress));
        assert!(errors.contains(&ValidationError::CommonPatterns));
        assert!(errors.contains(&ValidationError::MissingApiKey));
        assert!(errors.iter().any(|e| matches!(
            e,
            ValidationError::InvalidPattern { table: "admin", .. }
        )));
        assert!(errors.iter().any(|e| matches!(
            e,
            ValidationError::RelativeDashboard { name: "user", .. }
        )));
    }

    #[test]
    fn test_disabled_admin_needs_no_key() {
        let mut config = AppConfig::default();
        config.admin.enabled = false;
        config.admin.api_key = String::new();
        assert!(validate_config(&config).is_ok());
    }
}
