//! Subscription pricing subsystem.
//!
//! # Data Flow
//! ```text
//! PlanForm (strings) / PricingInput (JSON)
//!     → form.rs (coerce + validate numbers)
//!     → types.rs (Discount: None | Percentage | Flat)
//!     → engine.rs (final price, rounded to cents)
//!     → catalog.rs (reject negative prices, store plan)
//! ```
//!
//! # Design Decisions
//! - The engine is a pure function and never clamps its result
//! - Rounding happens in the engine, so create, update and display agree
//! - Bad input is reported per field and never read as zero

pub mod catalog;
pub mod engine;
pub mod form;
pub mod types;

pub use catalog::{PlanCatalog, PlanPatch, SubscriptionPlan};
pub use engine::{breakdown, compute_final_price, price, round2};
pub use form::{parse_amount, PlanDraft, PlanForm};
pub use types::{Discount, DiscountType, PriceBreakdown, PricingError, PricingInput, PricingResult};
