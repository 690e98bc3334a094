//! Page access gate.
//!
//! Applies route ownership to an incoming page request and decides whether
//! to serve it or where to send the visitor instead.

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::routing::authorizer::{Role, RouteAuthorizer, RouteOwner};

/// Outcome of evaluating a page request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum AccessDecision {
    /// Serve the page.
    Allow,
    /// Visitor must sign in first; `location` carries the `redirect` param.
    Login { location: String },
    /// Signed-in visitor is sent to their own dashboard.
    Dashboard { location: String },
}

impl AccessDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, AccessDecision::Allow)
    }

    pub fn location(&self) -> Option<&str> {
        match self {
            AccessDecision::Allow => None,
            AccessDecision::Login { location } | AccessDecision::Dashboard { location } => {
                Some(location)
            }
        }
    }
}

/// Decide what happens to a request for `path` by a visitor with an
/// optional session role.
pub fn evaluate(authorizer: &RouteAuthorizer, path: &str, session: Option<Role>) -> AccessDecision {
    if let Some(role) = session {
        if authorizer.is_auth_route(path) {
            return AccessDecision::Dashboard {
                location: authorizer.default_dashboard_route(role).to_string(),
            };
        }
    }

    let owner = match authorizer.classify_route(path) {
        None => return AccessDecision::Allow,
        Some(owner) => owner,
    };

    let Some(role) = session else {
        return AccessDecision::Login {
            location: login_location(authorizer.login_route(), path),
        };
    };

    match owner {
        RouteOwner::Common => AccessDecision::Allow,
        owner if owner.role() == Some(role) => AccessDecision::Allow,
        owner => {
            tracing::debug!(path = %path, role = %role, owner = ?owner, "Route owned by another role");
            AccessDecision::Dashboard {
                location: authorizer.default_dashboard_route(role).to_string(),
            }
        }
    }
}

fn login_location(login: &str, path: &str) -> String {
    let encoded: String = form_urlencoded::byte_serialize(path.as_bytes()).collect();
    format!("{}?redirect={}", login, encoded)
}
