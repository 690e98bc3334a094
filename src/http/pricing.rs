use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::pricing::{self, PriceBreakdown, PricingInput};

/// `POST /pricing/quote`: price a plan without storing it.
pub async fn quote(
    State(state): State<AppState>,
    payload: Result<Json<PricingInput>, JsonRejection>,
) -> Result<Json<PriceBreakdown>, ApiError> {
    let Json(input) = payload?;
    let breakdown = pricing::breakdown(&input, &state.config.pricing.currency)?;
    Ok(Json(breakdown))
}
