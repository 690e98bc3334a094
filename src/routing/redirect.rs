//! Post-login redirect resolution.
//!
//! A `redirect` query parameter is attacker-controlled. It is only followed
//! when it is a same-origin path that the signed-in role may visit;
//! everything else lands on the role's dashboard.

use url::Url;

use crate::routing::authorizer::{Role, RouteAuthorizer};

const LOCAL_ORIGIN: &str = "http://companion.local/";

/// Normalise a redirect target into `path[?query]`, or `None` if it leaves
/// the site (absolute URL, protocol-relative `//host`, backslash tricks).
pub fn normalize_redirect(target: &str) -> Option<String> {
    let target = target.trim();
    if !target.starts_with('/') || target.starts_with("//") || target.contains('\\') {
        return None;
    }

    let base = Url::parse(LOCAL_ORIGIN).ok()?;
    let joined = base.join(target).ok()?;
    if joined.origin() != base.origin() {
        return None;
    }

    let mut normalized = joined.path().to_string();
    if let Some(query) = joined.query() {
        normalized.push('?');
        normalized.push_str(query);
    }
    Some(normalized)
}

/// Why a redirect target was refused.
enum Refusal {
    OffSite,
    ForeignRole,
}

/// The normalised target when `role` may follow `raw`.
fn check_redirect(
    authorizer: &RouteAuthorizer,
    raw: &str,
    role: Role,
) -> Result<String, Refusal> {
    let target = normalize_redirect(raw).ok_or(Refusal::OffSite)?;
    let path = target.split('?').next().unwrap_or(&target);
    if authorizer.is_valid_redirect_for_role(path, role) {
        Ok(target)
    } else {
        Err(Refusal::ForeignRole)
    }
}

/// Whether a post-login redirect to `raw` would actually be followed.
pub fn is_followable_redirect(authorizer: &RouteAuthorizer, raw: &str, role: Role) -> bool {
    check_redirect(authorizer, raw, role).is_ok()
}

/// Where a freshly signed-in `role` should be sent.
pub fn resolve_post_login_redirect(
    authorizer: &RouteAuthorizer,
    redirect: Option<&str>,
    role: Role,
) -> String {
    let dashboard = authorizer.default_dashboard_route(role);

    let Some(raw) = redirect.filter(|r| !r.trim().is_empty()) else {
        return dashboard.to_string();
    };

    match check_redirect(authorizer, raw, role) {
        Ok(target) => target,
        Err(refusal) => {
            match refusal {
                Refusal::ForeignRole => tracing::warn!(
                    role = %role,
                    redirect = %raw,
                    "Redirect target owned by another role"
                ),
                Refusal::OffSite => {
                    tracing::warn!(role = %role, redirect = %raw, "Off-site redirect rejected")
                }
            }
            crate::observability::metrics::record_rejected_redirect(role.as_str());
            dashboard.to_string()
        }
    }
}
