//! Pricing types and error definitions.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Discount kind as it arrives from a subscription form or JSON payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountType {
    /// No discount; any discount value is ignored.
    None,
    /// Percentage of the base price.
    Percentage,
    /// Fixed amount subtracted from the base price.
    Flat,
}

impl DiscountType {
    /// Parse the form literal (`"NONE"`, `"PERCENTAGE"`, `"FLAT"`).
    /// An empty string means no discount type was selected.
    pub fn from_literal(s: &str) -> Option<Option<DiscountType>> {
        match s.trim() {
            "" => Some(None),
            "NONE" => Some(Some(DiscountType::None)),
            "PERCENTAGE" => Some(Some(DiscountType::Percentage)),
            "FLAT" => Some(Some(DiscountType::Flat)),
            _ => None,
        }
    }
}

/// A discount to apply to a base price.
///
/// [`Discount::percentage`], [`Discount::flat`] and [`PricingInput::discount`]
/// validate the carried value up front; the engine checks it again, so a
/// variant built directly with a negative or non-finite value is still refused.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Discount {
    None,
    Percentage(f64),
    Flat(f64),
}

impl Discount {
    /// Percentage discount (`value` percent off).
    pub fn percentage(value: f64) -> PricingResult<Self> {
        check_amount("discount_value", value)?;
        Ok(Discount::Percentage(value))
    }

    /// Flat discount (`value` currency units off).
    pub fn flat(value: f64) -> PricingResult<Self> {
        check_amount("discount_value", value)?;
        Ok(Discount::Flat(value))
    }

    /// The boundary representation of this discount.
    pub fn kind(&self) -> Option<DiscountType> {
        match self {
            Discount::None => None,
            Discount::Percentage(_) => Some(DiscountType::Percentage),
            Discount::Flat(_) => Some(DiscountType::Flat),
        }
    }

    /// The discount value, if a discount is set.
    pub fn value(&self) -> Option<f64> {
        match self {
            Discount::None => None,
            Discount::Percentage(v) | Discount::Flat(v) => Some(*v),
        }
    }
}

/// Raw pricing payload (base price + optional discount).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingInput {
    pub base_price: f64,
    #[serde(default)]
    pub discount_type: Option<DiscountType>,
    #[serde(default)]
    pub discount_value: Option<f64>,
}

impl PricingInput {
    /// Validate the discount half of the payload into a [`Discount`].
    ///
    /// A `NONE`/missing type ignores the value entirely. A set type with a
    /// missing value is rejected rather than treated as zero.
    pub fn discount(&self) -> PricingResult<Discount> {
        match self.discount_type {
            None | Some(DiscountType::None) => Ok(Discount::None),
            Some(kind) => {
                let value = self.discount_value.ok_or_else(|| PricingError::InvalidInput {
                    field: "discount_value",
                    reason: "required when a discount type is set".to_string(),
                })?;
                match kind {
                    DiscountType::Percentage => Discount::percentage(value),
                    DiscountType::Flat => Discount::flat(value),
                    DiscountType::None => Ok(Discount::None),
                }
            }
        }
    }
}

/// Display-ready price with the discount broken out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    pub base_price: f64,
    pub discount_type: Option<DiscountType>,
    pub discount_value: Option<f64>,
    /// Amount taken off the base price (rounded to cents).
    pub discount_amount: f64,
    pub final_price: f64,
    pub currency: String,
}

/// Errors produced while pricing or storing subscription plans.
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    /// Malformed or out-of-range numeric input.
    #[error("invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    /// The discount would make the plan cost less than nothing.
    #[error("final price {0:.2} is negative; discount exceeds base price")]
    NegativeFinalPrice(f64),

    /// Non-numeric plan field failed validation.
    #[error("invalid plan {field}: {reason}")]
    InvalidPlan { field: &'static str, reason: String },

    #[error("subscription plan {0} not found")]
    PlanNotFound(Uuid),
}

impl PricingError {
    /// Name of the field the error refers to, if any.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            PricingError::InvalidInput { field, .. } | PricingError::InvalidPlan { field, .. } => {
                Some(*field)
            }
            PricingError::NegativeFinalPrice(_) => Some("discount_value"),
            PricingError::PlanNotFound(_) => None,
        }
    }
}

/// Result type for pricing operations.
pub type PricingResult<T> = Result<T, PricingError>;

/// Reject NaN, infinities and negative amounts.
pub(crate) fn check_amount(field: &'static str, value: f64) -> PricingResult<()> {
    if !value.is_finite() {
        return Err(PricingError::InvalidInput {
            field,
            reason: "must be a finite number".to_string(),
        });
    }
    if value < 0.0 {
        return Err(PricingError::InvalidInput {
            field,
            reason: format!("must not be negative (got {})", value),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discount_type_serde_literals() {
        let json = serde_json::to_string(&DiscountType::Percentage).unwrap();
        assert_eq!(json, "\"PERCENTAGE\"");

        let input: PricingInput =
            serde_json::from_str(r#"{"base_price": 300, "discount_type": null, "discount_value": null}"#)
                .unwrap();
        assert_eq!(input.discount_type, None);
        assert_eq!(input.discount().unwrap(), Discount::None);
    }

    #[test]
    fn test_none_ignores_value() {
        let input = PricingInput {
            base_price: 10.0,
            discount_type: Some(DiscountType::None),
            discount_value: Some(-5.0),
        };
        assert_eq!(input.discount().unwrap(), Discount::None);
    }

    #[test]
    fn test_missing_value_rejected() {
        let input = PricingInput {
            base_price: 10.0,
            discount_type: Some(DiscountType::Flat),
            discount_value: None,
        };
        let err = input.discount().unwrap_err();
        assert_eq!(err.field(), Some("discount_value"));
    }

    #[test]
    fn test_negative_and_nan_values_rejected() {
        assert!(Discount::flat(-1.0).is_err());
        assert!(Discount::percentage(f64::NAN).is_err());
        assert!(Discount::percentage(f64::INFINITY).is_err());
        assert_eq!(Discount::flat(0.0).unwrap(), Discount::Flat(0.0));
    }

    #[test]
    fn test_literal_parsing() {
        assert_eq!(DiscountType::from_literal("FLAT"), Some(Some(DiscountType::Flat)));
        assert_eq!(DiscountType::from_literal(""), Some(None));
        assert_eq!(DiscountType::from_literal("flat"), None);
    }

    #[test]
    fn test_error_display() {
        let err = PricingError::NegativeFinalPrice(-50.0);
        assert_eq!(
            err.to_string(),
            "final price -50.00 is negative; discount exceeds base price"
        );
    }
}
