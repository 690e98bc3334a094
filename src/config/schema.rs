//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the companion service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Route ownership tables.
    pub routes: RoutesConfig,

    /// Landing page for each role after login.
    pub dashboards: DashboardConfig,

    /// Pricing display settings.
    pub pricing: PricingConfig,

    /// Plan management authentication.
    pub admin: AdminConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// One role's route rules.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RouteRules {
    /// Paths matched by full string equality, in order.
    pub exact: Vec<String>,

    /// Regular expressions matched against the path (usually `^/prefix`).
    pub patterns: Vec<String>,
}

impl RouteRules {
    fn exact(paths: &[&str]) -> Self {
        Self {
            exact: paths.iter().map(|p| p.to_string()).collect(),
            patterns: Vec::new(),
        }
    }

    fn patterns(patterns: &[&str]) -> Self {
        Self {
            exact: Vec::new(),
            patterns: patterns.iter().map(|p| p.to_string()).collect(),
        }
    }
}

/// Route ownership tables, checked admin → moderator → user → common.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RoutesConfig {
    pub admin: RouteRules,
    pub moderator: RouteRules,
    pub user: RouteRules,

    /// Routes shared by every signed-in role (exact match only).
    pub common: RouteRules,

    /// Login/registration pages that signed-in users are bounced away from.
    pub auth: Vec<String>,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            admin: RouteRules::patterns(&["^/admin"]),
            moderator: RouteRules::patterns(&["^/moderator"]),
            user: RouteRules::patterns(&["^/dashboard"]),
            common: RouteRules::exact(&["/my-profile", "/settings", "/change-password"]),
            auth: vec![
                "/login".to_string(),
                "/register".to_string(),
                "/forgot-password".to_string(),
            ],
        }
    }
}

/// Default dashboard per role.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub admin: String,
    pub moderator: String,
    pub user: String,

    /// Used for roles the service does not recognise.
    pub fallback: String,

    /// Where unauthenticated visitors of protected pages are sent.
    pub login: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            admin: "/admin/dashboard".to_string(),
            moderator: "/moderator/dashboard".to_string(),
            user: "/dashboard".to_string(),
            fallback: "/".to_string(),
            login: "/login".to_string(),
        }
    }
}

/// Pricing display configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PricingConfig {
    /// Currency code attached to price breakdowns.
    pub currency: String,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            currency: "BDT".to_string(),
        }
    }
}

/// Shipped admin key; never valid for real deployments.
pub const PLACEHOLDER_API_KEY: &str = "CHANGE_ME_IN_PRODUCTION";

/// Plan management configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Enable the plan management endpoints.
    pub enabled: bool,

    /// API key for authentication (Bearer token).
    pub api_key: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            // WARNING: This is a placeholder! Change this in production.
            api_key: PLACEHOLDER_API_KEY.to_string(),
        }
    }
}

impl AdminConfig {
    /// Admin endpoints are reachable with the publicly known default key.
    pub fn uses_placeholder_key(&self) -> bool {
        self.enabled && self.api_key.trim() == PLACEHOLDER_API_KEY
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [listener]
            bind_address = "127.0.0.1:3000"

            [routes.common]
            exact = ["/my-profile", "/inbox"]
            "#,
        )
        .unwrap();

        assert_eq!(config.listener.bind_address, "127.0.0.1:3000");
        assert_eq!(config.routes.common.exact, vec!["/my-profile", "/inbox"]);
        assert_eq!(config.routes.admin.patterns, vec!["^/admin"]);
        assert_eq!(config.dashboards.moderator, "/moderator/dashboard");
        assert_eq!(config.timeouts.request_secs, 30);
    }

    #[test]
    fn test_placeholder_admin_key_detection() {
        let mut admin = AdminConfig::default();
        assert!(admin.uses_placeholder_key());

        admin.enabled = false;
        assert!(!admin.uses_placeholder_key());

        admin.enabled = true;
        admin.api_key = "s3cret".to_string();
        assert!(!admin.uses_placeholder_key());
    }
}
