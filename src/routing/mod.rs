//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming path (+ optional session role)
//!     → authorizer.rs (owner lookup: admin → moderator → user → common)
//!     → matcher.rs (exact strings, prefix regexes)
//!     → gate.rs / redirect.rs (allow, or where to send the visitor)
//!
//! Route Compilation (at startup):
//!     RoutesConfig
//!     → Compile matchers (exact lists, regexes)
//!     → Freeze as immutable RouteAuthorizer
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - Deterministic: same input always yields the same owner
//! - First match wins (ordered by role precedence)

pub mod authorizer;
pub mod gate;
pub mod matcher;
pub mod redirect;

pub use authorizer::{Role, RouteAuthorizer, RouteOwner, UnknownRole};
pub use gate::{evaluate, AccessDecision};
pub use redirect::{is_followable_redirect, normalize_redirect, resolve_post_login_redirect};
