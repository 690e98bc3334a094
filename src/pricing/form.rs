//! Coercion of subscription-plan form fields.
//!
//! HTML forms submit every field as a string. Values are parsed here, before
//! anything reaches the pricing engine, and an unparseable value is reported
//! against its field instead of being read as zero.

use serde::{Deserialize, Serialize};

use crate::pricing::types::{
    check_amount, DiscountType, PricingError, PricingInput, PricingResult,
};

/// A subscription plan exactly as submitted by the management form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanForm {
    pub name: String,
    pub duration_days: String,
    pub base_price: String,
    pub discount_type: String,
    pub discount_value: String,
}

/// A plan with typed fields, ready for the catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanDraft {
    pub name: String,
    pub duration_days: u32,
    #[serde(flatten)]
    pub pricing: PricingInput,
}

/// Parse a decimal amount from a form field.
pub fn parse_amount(field: &'static str, raw: &str) -> PricingResult<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(PricingError::InvalidInput {
            field,
            reason: "is required".to_string(),
        });
    }
    let value: f64 = trimmed.parse().map_err(|_| PricingError::InvalidInput {
        field,
        reason: format!("'{}' is not a number", trimmed),
    })?;
    check_amount(field, value)?;
    Ok(value)
}

fn parse_days(raw: &str) -> PricingResult<u32> {
    let trimmed = raw.trim();
    trimmed.parse().map_err(|_| PricingError::InvalidPlan {
        field: "duration_days",
        reason: format!("'{}' is not a whole number of days", trimmed),
    })
}

impl TryFrom<PlanForm> for PlanDraft {
    type Error = PricingError;

    fn try_from(form: PlanForm) -> Result<Self, Self::Error> {
        let discount_type =
            DiscountType::from_literal(&form.discount_type).ok_or_else(|| {
                PricingError::InvalidInput {
                    field: "discount_type",
                    reason: format!("unknown discount type '{}'", form.discount_type.trim()),
                }
            })?;

        let discount_value = match discount_type {
            None | Some(DiscountType::None) => None,
            Some(_) => Some(parse_amount("discount_value", &form.discount_value)?),
        };

        Ok(PlanDraft {
            name: form.name.trim().to_string(),
            duration_days: parse_days(&form.duration_days)?,
            pricing: PricingInput {
                base_price: parse_amount("base_price", &form.base_price)?,
                discount_type,
                discount_value,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(base: &str, kind: &str, value: &str) -> PlanForm {
        PlanForm {
            name: " Explorer ".to_string(),
            duration_days: "30".to_string(),
            base_price: base.to_string(),
            discount_type: kind.to_string(),
            discount_value: value.to_string(),
        }
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("base_price", " 12.50 ").unwrap(), 12.5);
        assert!(parse_amount("base_price", "").is_err());
        assert!(parse_amount("base_price", "abc").is_err());
        assert!(parse_amount("base_price", "-3").is_err());
        assert!(parse_amount("base_price", "NaN").is_err());
    }

    #[test]
    fn test_form_to_draft() {
        let draft = PlanDraft::try_from(form("1000", "PERCENTAGE", "10")).unwrap();
        assert_eq!(draft.name, "Explorer");
        assert_eq!(draft.duration_days, 30);
        assert_eq!(draft.pricing.base_price, 1000.0);
        assert_eq!(draft.pricing.discount_type, Some(DiscountType::Percentage));
        assert_eq!(draft.pricing.discount_value, Some(10.0));
    }

    #[test]
    fn test_form_without_discount_ignores_value_field() {
        let draft = PlanDraft::try_from(form("300", "", "garbage")).unwrap();
        assert_eq!(draft.pricing.discount_type, None);
        assert_eq!(draft.pricing.discount_value, None);
    }

    #[test]
    fn test_form_reports_failing_field() {
        let err = PlanDraft::try_from(form("", "FLAT", "5")).unwrap_err();
        assert_eq!(err.field(), Some("base_price"));

        let err = PlanDraft::try_from(form("100", "FLAT", "")).unwrap_err();
        assert_eq!(err.field(), Some("discount_value"));

        let err = PlanDraft::try_from(form("100", "HALF", "5")).unwrap_err();
        assert_eq!(err.field(), Some("discount_type"));

        let mut bad_days = form("100", "", "");
        bad_days.duration_days = "a month".to_string();
        let err = PlanDraft::try_from(bad_days).unwrap_err();
        assert_eq!(err.field(), Some("duration_days"));
    }
}
