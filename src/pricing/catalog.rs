//! In-memory subscription plan catalogue.

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

use crate::pricing::engine::compute_final_price;
use crate::pricing::form::PlanDraft;
use crate::pricing::types::{
    check_amount, DiscountType, PricingError, PricingInput, PricingResult,
};

/// A priced subscription tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionPlan {
    pub id: Uuid,
    pub name: String,
    pub duration_days: u32,
    pub base_price: f64,
    pub discount_type: Option<DiscountType>,
    pub discount_value: Option<f64>,
    pub final_price: f64,
    pub active: bool,
    /// Unix timestamp (seconds).
    pub created_at: u64,
    /// Unix timestamp (seconds).
    pub updated_at: u64,
}

impl SubscriptionPlan {
    fn pricing(&self) -> PricingInput {
        PricingInput {
            base_price: self.base_price,
            discount_type: self.discount_type,
            discount_value: self.discount_value,
        }
    }
}

/// Partial update for a plan. Missing fields keep their current value;
/// a `NONE` discount type clears the discount.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanPatch {
    pub name: Option<String>,
    pub duration_days: Option<u32>,
    pub base_price: Option<f64>,
    pub discount_type: Option<DiscountType>,
    pub discount_value: Option<f64>,
    pub active: Option<bool>,
}

/// Validated pricing fields of a plan.
struct Priced {
    base_price: f64,
    discount_type: Option<DiscountType>,
    discount_value: Option<f64>,
    final_price: f64,
}

/// Run a payload through the engine and refuse prices that cannot be stored.
fn price_for_storage(input: &PricingInput) -> PricingResult<Priced> {
    check_amount("base_price", input.base_price)?;
    let discount = input.discount()?;
    let final_price = compute_final_price(input.base_price, discount)?;

    if final_price < 0.0 {
        return Err(PricingError::NegativeFinalPrice(final_price));
    }

    Ok(Priced {
        base_price: input.base_price,
        discount_type: discount.kind(),
        discount_value: discount.value(),
        final_price,
    })
}

fn check_name(name: &str) -> PricingResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(PricingError::InvalidPlan {
            field: "name",
            reason: "must not be empty".to_string(),
        });
    }
    Ok(name.to_string())
}

fn check_duration(days: u32) -> PricingResult<u32> {
    if days == 0 {
        return Err(PricingError::InvalidPlan {
            field: "duration_days",
            reason: "must be at least one day".to_string(),
        });
    }
    Ok(days)
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// Thread-safe plan store shared by the HTTP handlers.
#[derive(Clone, Default)]
pub struct PlanCatalog {
    plans: Arc<DashMap<Uuid, SubscriptionPlan>>,
}

impl PlanCatalog {
    /// Create an empty catalogue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Price and store a new plan.
    pub fn create(&self, draft: PlanDraft) -> PricingResult<SubscriptionPlan> {
        let name = check_name(&draft.name)?;
        let duration_days = check_duration(draft.duration_days)?;
        let priced = price_for_storage(&draft.pricing)?;
        let now = now_secs();

        let plan = SubscriptionPlan {
            id: Uuid::new_v4(),
            name,
            duration_days,
            base_price: priced.base_price,
            discount_type: priced.discount_type,
            discount_value: priced.discount_value,
            final_price: priced.final_price,
            active: true,
            created_at: now,
            updated_at: now,
        };

        self.plans.insert(plan.id, plan.clone());
        tracing::info!(
            plan_id = %plan.id,
            name = %plan.name,
            final_price = plan.final_price,
            "Subscription plan created"
        );
        Ok(plan)
    }

    /// Apply a partial update and re-price the plan.
    ///
    /// The stored plan is left untouched if any field fails validation.
    pub fn update(&self, id: Uuid, patch: PlanPatch) -> PricingResult<SubscriptionPlan> {
        let mut entry = self
            .plans
            .get_mut(&id)
            .ok_or(PricingError::PlanNotFound(id))?;
        let current = entry.value().clone();

        let name = match patch.name {
            Some(ref n) => check_name(n)?,
            None => current.name.clone(),
        };
        let duration_days = match patch.duration_days {
            Some(d) => check_duration(d)?,
            None => current.duration_days,
        };

        let mut pricing = current.pricing();
        if let Some(base) = patch.base_price {
            pricing.base_price = base;
        }
        if let Some(kind) = patch.discount_type {
            pricing.discount_type = Some(kind);
        }
        if let Some(value) = patch.discount_value {
            pricing.discount_value = Some(value);
        }
        let priced = price_for_storage(&pricing)?;

        let updated = SubscriptionPlan {
            name,
            duration_days,
            base_price: priced.base_price,
            discount_type: priced.discount_type,
            discount_value: priced.discount_value,
            final_price: priced.final_price,
            active: patch.active.unwrap_or(current.active),
            updated_at: now_secs(),
            ..current
        };
        *entry.value_mut() = updated.clone();

        tracing::info!(
            plan_id = %id,
            final_price = updated.final_price,
            "Subscription plan updated"
        );
        Ok(updated)
    }

    /// Look up a plan by id.
    pub fn get(&self, id: Uuid) -> Option<SubscriptionPlan> {
        self.plans.get(&id).map(|r| r.value().clone())
    }

    /// All plans, shortest duration first, then by name.
    pub fn list(&self) -> Vec<SubscriptionPlan> {
        let mut plans: Vec<SubscriptionPlan> =
            self.plans.iter().map(|r| r.value().clone()).collect();
        plans.sort_by(|a, b| {
            a.duration_days
                .cmp(&b.duration_days)
                .then_with(|| a.name.cmp(&b.name))
        });
        plans
    }

    /// Remove a plan.
    pub fn delete(&self, id: Uuid) -> PricingResult<SubscriptionPlan> {
        let (_, plan) = self
            .plans
            .remove(&id)
            .ok_or(PricingError::PlanNotFound(id))?;
        tracing::info!(plan_id = %id, "Subscription plan deleted");
        Ok(plan)
    }

    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }
}
