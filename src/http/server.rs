//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, timeout, request ID, metrics)
//! - Bind server to listener
//! - Compile route tables and hold the plan catalogue

use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::admin::setup_admin_router;
use crate::config::AppConfig;
use crate::http::request::{make_span, track_metrics};
use crate::http::{plans, pricing, routes};
use crate::pricing::PlanCatalog;
use crate::routing::RouteAuthorizer;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub authorizer: Arc<RouteAuthorizer>,
    pub catalog: PlanCatalog,
}

impl AppState {
    /// Compile the route tables and start with an empty catalogue.
    pub fn new(config: AppConfig) -> Result<Self, ServerError> {
        let authorizer = RouteAuthorizer::new(&config.routes, config.dashboards.clone())?;
        Ok(Self {
            config: Arc::new(config),
            authorizer: Arc::new(authorizer),
            catalog: PlanCatalog::new(),
        })
    }
}

/// Errors raised while building or running the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid route pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub status: &'static str,
}

/// HTTP server for the companion service.
pub struct HttpServer {
    router: Router,
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: AppConfig) -> Result<Self, ServerError> {
        let state = AppState::new(config)?;
        let router = Self::build_router(state.clone());
        Ok(Self { router, state })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    pub fn build_router(state: AppState) -> Router {
        let request_timeout = Duration::from_secs(state.config.timeouts.request_secs);

        Router::new()
            .route("/health", get(health))
            .route("/pricing/quote", post(pricing::quote))
            .route("/routes/classify", get(routes::classify))
            .route("/routes/redirect", get(routes::redirect))
            .route("/routes/dashboard/{role}", get(routes::dashboard))
            .route("/routes/access", get(routes::access))
            .route("/plans", get(plans::list_plans))
            .route("/plans/{id}", get(plans::get_plan))
            .merge(setup_admin_router(state.clone()))
            .route_layer(middleware::from_fn(track_metrics))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(TraceLayer::new_for_http().make_span_with(make_span))
                    .layer(TimeoutLayer::new(request_timeout))
                    .layer(PropagateRequestIdLayer::x_request_id()),
            )
    }

    /// Run the server until `shutdown` resolves.
    pub async fn run<F>(self, listener: TcpListener, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Shared state (config, route tables, catalogue).
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// The assembled router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}

async fn health() -> Json<SystemStatus> {
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
    })
}
