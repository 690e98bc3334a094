//! Route ownership lookup.
//!
//! # Responsibilities
//! - Resolve which role owns a path
//! - Decide whether a post-login redirect is allowed for a role
//! - Map each role to its default dashboard
//!
//! # Design Decisions
//! - Compiled once from config, immutable afterwards (shared via Arc)
//! - Precedence admin → moderator → user → common; first match wins
//! - Unmatched paths are public, never an error

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::{DashboardConfig, RoutesConfig};
use crate::routing::matcher::{Matcher, RuleSet};

/// Signed-in user role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Moderator,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Moderator => "MODERATOR",
            Role::User => "USER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known role.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role '{0}'")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    /// Only the exact literals `ADMIN`, `MODERATOR` and `USER`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        [Role::Admin, Role::Moderator, Role::User]
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

/// Owner of a path: a single role, or every signed-in role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RouteOwner {
    Admin,
    Moderator,
    User,
    Common,
}

impl RouteOwner {
    /// The owning role, or `None` for shared routes.
    pub fn role(&self) -> Option<Role> {
        match self {
            RouteOwner::Admin => Some(Role::Admin),
            RouteOwner::Moderator => Some(Role::Moderator),
            RouteOwner::User => Some(Role::User),
            RouteOwner::Common => None,
        }
    }
}

impl From<Role> for RouteOwner {
    fn from(role: Role) -> Self {
        match role {
            Role::Admin => RouteOwner::Admin,
            Role::Moderator => RouteOwner::Moderator,
            Role::User => RouteOwner::User,
        }
    }
}

/// Compiled route ownership tables.
#[derive(Debug)]
pub struct RouteAuthorizer {
    admin: RuleSet,
    moderator: RuleSet,
    user: RuleSet,
    common: RuleSet,
    auth: RuleSet,
    dashboards: DashboardConfig,
}

impl RouteAuthorizer {
    /// Compile the route tables. Fails only on an invalid regex, which
    /// config validation already reports.
    pub fn new(routes: &RoutesConfig, dashboards: DashboardConfig) -> Result<Self, regex::Error> {
        Ok(Self {
            admin: RuleSet::compile(&routes.admin)?,
            moderator: RuleSet::compile(&routes.moderator)?,
            user: RuleSet::compile(&routes.user)?,
            common: RuleSet::exact(routes.common.exact.as_slice()),
            auth: RuleSet::exact(routes.auth.as_slice()),
            dashboards,
        })
    }

    /// Which role owns `path`; `None` means the path is public.
    pub fn classify_route(&self, path: &str) -> Option<RouteOwner> {
        if self.admin.matches(path) {
            Some(RouteOwner::Admin)
        } else if self.moderator.matches(path) {
            Some(RouteOwner::Moderator)
        } else if self.user.matches(path) {
            Some(RouteOwner::User)
        } else if self.common.matches(path) {
            Some(RouteOwner::Common)
        } else {
            None
        }
    }

    /// Whether a signed-in `role` may be sent to `path` after login.
    pub fn is_valid_redirect_for_role(&self, path: &str, role: Role) -> bool {
        match self.classify_route(path) {
            None | Some(RouteOwner::Common) => true,
            Some(owner) => owner.role() == Some(role),
        }
    }

    /// Landing page for a role.
    pub fn default_dashboard_route(&self, role: Role) -> &str {
        match role {
            Role::Admin => &self.dashboards.admin,
            Role::Moderator => &self.dashboards.moderator,
            Role::User => &self.dashboards.user,
        }
    }

    /// Landing page for a role given as a string; unknown roles go to the
    /// fallback (site root by default).
    pub fn default_dashboard_for(&self, role: &str) -> &str {
        match role.parse::<Role>() {
            Ok(role) => self.default_dashboard_route(role),
            Err(_) => &self.dashboards.fallback,
        }
    }

    /// Login/registration pages.
    pub fn is_auth_route(&self, path: &str) -> bool {
        self.auth.matches(path)
    }

    pub fn login_route(&self) -> &str {
        &self.dashboards.login
    }
}
