use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::http::error::{ApiError, ErrorBody};
use crate::http::server::AppState;

/// Guard plan management behind the configured bearer token.
pub async fn admin_auth_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let admin = &state.config.admin;
    if !admin.enabled {
        return ApiError::Disabled("Plan management disabled").into_response();
    }

    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    if let Some(auth_val) = auth_header {
        if auth_val.strip_prefix("Bearer ") == Some(admin.api_key.as_str()) {
            return next.run(request).await;
        }
    }

    tracing::warn!(path = %request.uri().path(), "Rejected unauthenticated admin request");
    (
        StatusCode::UNAUTHORIZED,
        Json(ErrorBody {
            error: "missing or invalid admin token".to_string(),
            field: None,
        }),
    )
        .into_response()
}
