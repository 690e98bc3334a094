//! Route ownership endpoints.

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::HeaderMap,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::routing::{
    gate, is_followable_redirect, resolve_post_login_redirect, AccessDecision, Role, RouteOwner,
};

/// Header carrying the signed-in role, set by the session layer in front of us.
pub const X_USER_ROLE: &str = "x-user-role";

#[derive(Debug, Deserialize)]
pub struct PathQuery {
    #[serde(default)]
    pub path: String,
}

#[derive(Debug, Deserialize)]
pub struct RedirectQuery {
    #[serde(default)]
    pub path: String,
    pub role: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Classification {
    pub path: String,
    pub owner: Option<RouteOwner>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RedirectCheck {
    pub path: String,
    pub role: Role,
    pub valid: bool,
    /// Where the user is actually sent after login.
    pub target: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DashboardRoute {
    pub role: String,
    pub path: String,
}

/// `GET /routes/classify?path=`
pub async fn classify(
    State(state): State<AppState>,
    query: Result<Query<PathQuery>, QueryRejection>,
) -> Result<Json<Classification>, ApiError> {
    let Query(query) = query?;
    let owner = state.authorizer.classify_route(&query.path);
    Ok(Json(Classification {
        path: query.path,
        owner,
    }))
}

/// `GET /routes/redirect?path=&role=`
pub async fn redirect(
    State(state): State<AppState>,
    query: Result<Query<RedirectQuery>, QueryRejection>,
) -> Result<Json<RedirectCheck>, ApiError> {
    let Query(query) = query?;
    let role: Role = query.role.parse()?;
    let valid = is_followable_redirect(&state.authorizer, &query.path, role);
    let target = resolve_post_login_redirect(&state.authorizer, Some(&query.path), role);

    Ok(Json(RedirectCheck {
        path: query.path,
        role,
        valid,
        target,
    }))
}

/// `GET /routes/dashboard/{role}`
pub async fn dashboard(
    State(state): State<AppState>,
    Path(role): Path<String>,
) -> Json<DashboardRoute> {
    let path = state.authorizer.default_dashboard_for(&role).to_string();
    Json(DashboardRoute { role, path })
}

/// `GET /routes/access?path=` with optional `X-User-Role`.
pub async fn access(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<PathQuery>, QueryRejection>,
) -> Result<Json<AccessDecision>, ApiError> {
    let Query(query) = query?;
    let session = session_role(&headers)?;
    Ok(Json(gate::evaluate(&state.authorizer, &query.path, session)))
}

fn session_role(headers: &HeaderMap) -> Result<Option<Role>, ApiError> {
    match headers.get(X_USER_ROLE).and_then(|v| v.to_str().ok()) {
        Some(raw) if !raw.trim().is_empty() => Ok(Some(raw.parse::<Role>()?)),
        _ => Ok(None),
    }
}
