use axum::{
    extract::{
        rejection::{FormRejection, JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Form, Json,
};
use uuid::Uuid;

use crate::http::error::ApiError;
use crate::http::plans::plan_id;
use crate::http::server::AppState;
use crate::pricing::{PlanDraft, PlanForm, PlanPatch, SubscriptionPlan};

/// `POST /plans` with a JSON body.
pub async fn create_plan(
    State(state): State<AppState>,
    payload: Result<Json<PlanDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<SubscriptionPlan>), ApiError> {
    let Json(draft) = payload?;
    let plan = state.catalog.create(draft)?;
    Ok((StatusCode::CREATED, Json(plan)))
}

/// `POST /plans/form` with the management form's url-encoded fields.
pub async fn create_plan_from_form(
    State(state): State<AppState>,
    form: Result<Form<PlanForm>, FormRejection>,
) -> Result<(StatusCode, Json<SubscriptionPlan>), ApiError> {
    let Form(form) = form?;
    let draft = PlanDraft::try_from(form)?;
    let plan = state.catalog.create(draft)?;
    Ok((StatusCode::CREATED, Json(plan)))
}

/// `PATCH /plans/{id}`
pub async fn update_plan(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<PlanPatch>, JsonRejection>,
) -> Result<Json<SubscriptionPlan>, ApiError> {
    let id = plan_id(id)?;
    let Json(patch) = payload?;
    Ok(Json(state.catalog.update(id, patch)?))
}

/// `DELETE /plans/{id}`
pub async fn delete_plan(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let id = plan_id(id)?;
    state.catalog.delete(id)?;
    Ok(StatusCode::NO_CONTENT)
}
