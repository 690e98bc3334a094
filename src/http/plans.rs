use axum::{
    extract::{rejection::PathRejection, Path, State},
    Json,
};
use uuid::Uuid;

use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::pricing::{PricingError, SubscriptionPlan};

/// Unwrap a `{id}` path segment, naming the field when it is not a UUID.
pub(crate) fn plan_id(id: Result<Path<Uuid>, PathRejection>) -> Result<Uuid, ApiError> {
    let Path(id) = id.map_err(|e| ApiError::from(e).with_field("id"))?;
    Ok(id)
}

/// `GET /plans`
pub async fn list_plans(State(state): State<AppState>) -> Json<Vec<SubscriptionPlan>> {
    Json(state.catalog.list())
}

/// `GET /plans/{id}`
pub async fn get_plan(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<SubscriptionPlan>, ApiError> {
    let id = plan_id(id)?;
    state
        .catalog
        .get(id)
        .map(Json)
        .ok_or(ApiError::Pricing(PricingError::PlanNotFound(id)))
}
