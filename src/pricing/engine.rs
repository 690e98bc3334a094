//! Core logic for calculating subscription prices.

use crate::pricing::types::{
    check_amount, Discount, PriceBreakdown, PricingError, PricingInput, PricingResult,
};

/// Compute the final price of a plan from its base price and discount.
///
/// The result is rounded to cents. It is not clamped: a flat discount larger
/// than the base price yields a negative price, and callers that persist
/// prices must reject that themselves.
pub fn compute_final_price(base_price: f64, discount: Discount) -> PricingResult<f64> {
    check_amount("base_price", base_price)?;
    if let Some(value) = discount.value() {
        check_amount("discount_value", value)?;
    }

    let raw = match discount {
        Discount::None => base_price,
        Discount::Percentage(value) => base_price - (base_price * value / 100.0),
        Discount::Flat(value) => base_price - value,
    };

    let final_price = round2(raw);
    if !final_price.is_finite() {
        return Err(PricingError::InvalidInput {
            field: "base_price",
            reason: "too large to price".to_string(),
        });
    }
    Ok(final_price)
}

/// Price a raw payload: validate the discount, then compute.
pub fn price(input: &PricingInput) -> PricingResult<f64> {
    check_amount("base_price", input.base_price)?;
    let discount = input.discount()?;
    compute_final_price(input.base_price, discount)
}

/// Price a raw payload and break the result down for display.
pub fn breakdown(input: &PricingInput, currency: &str) -> PricingResult<PriceBreakdown> {
    check_amount("base_price", input.base_price)?;
    let discount = input.discount()?;
    let final_price = compute_final_price(input.base_price, discount)?;

    Ok(PriceBreakdown {
        base_price: round2(input.base_price),
        discount_type: discount.kind(),
        discount_value: discount.value(),
        discount_amount: round2(input.base_price - final_price),
        final_price,
        currency: currency.to_string(),
    })
}

/// Round to two decimal places (currency precision).
pub fn round2(value: f64) -> f64 {
    // `+ 0.0` folds a negative zero into zero
    if value.fract() == 0.0 {
        // whole amounts, including every f64 beyond 2^52, carry no cents
        return value + 0.0;
    }
    (value * 100.0).round() / 100.0 + 0.0
}
