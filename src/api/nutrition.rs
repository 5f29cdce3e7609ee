//! Nutrition handlers

use axum::extract::State;
use axum::Json;

use super::extract::{JsonBody, PathParams};
use super::{blocking, AppState};
use crate::error::ServiceResult;
use crate::models::MealItem;
use crate::nutrition::IntakeTotals;
use crate::tools::nutrition::{self, CatalogResponse, IntakeRequest, MealPlanResponse};

pub(super) async fn handle_recommendations(
    State(state): State<AppState>,
    PathParams(objetivo): PathParams<String>,
) -> ServiceResult<Json<Vec<MealItem>>> {
    blocking(move || nutrition::recommendations(&state.store, &objetivo))
        .await
        .map(Json)
}

pub(super) async fn handle_meal_plan(
    State(state): State<AppState>,
    PathParams(usuario): PathParams<String>,
) -> ServiceResult<Json<MealPlanResponse>> {
    blocking(move || nutrition::meal_plan(&state.store, &usuario))
        .await
        .map(Json)
}

pub(super) async fn handle_catalog() -> Json<CatalogResponse> {
    Json(nutrition::catalog())
}

pub(super) async fn handle_calculate(
    JsonBody(req): JsonBody<IntakeRequest>,
) -> ServiceResult<Json<IntakeTotals>> {
    nutrition::calculate(req).map(Json)
}
