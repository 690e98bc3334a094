pub mod auth;
pub mod handlers;

use axum::{
    middleware,
    routing::{patch, post},
    Router,
};

use self::auth::admin_auth_middleware;
use self::handlers::*;
use crate::http::server::AppState;

/// Plan management routes, all behind the admin bearer token.
pub fn setup_admin_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/plans", post(create_plan))
        .route("/plans/form", post(create_plan_from_form))
        .route("/plans/{id}", patch(update_plan).delete(delete_plan))
        .route_layer(middleware::from_fn_with_state(state, admin_auth_middleware))
}
