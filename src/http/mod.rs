//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID, span, metrics)
//!     → pricing.rs / routes.rs / plans.rs (handlers)
//!     → error.rs (JSON error bodies)
//!     → Send to client
//! ```

pub mod error;
pub mod plans;
pub mod pricing;
pub mod request;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use request::X_REQUEST_ID;
pub use server::{AppState, HttpServer, ServerError};
