//! Travel companion access & pricing library.
//!
//! Subscription plan pricing and role-based route ownership, plus the axum
//! service that exposes them.

pub mod admin;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod pricing;
pub mod routing;

pub use config::AppConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use pricing::{compute_final_price, Discount, DiscountType, PricingError};
pub use routing::{Role, RouteAuthorizer, RouteOwner};
