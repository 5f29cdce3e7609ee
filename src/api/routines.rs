//! Routine and progress handlers

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use super::extract::{JsonBody, PathParams};
use super::{blocking, AppState};
use crate::error::{ServiceError, ServiceResult};
use crate::models::{ProgressSummary, Routine};
use crate::tools::routines::{self, CreateRoutineResponse, RoutineInput, SetChange};
use crate::tools::MessageResponse;

pub(super) async fn handle_create(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<RoutineInput>,
) -> ServiceResult<(StatusCode, Json<CreateRoutineResponse>)> {
    let created = blocking(move || routines::create_routine(&state.store, input)).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub(super) async fn handle_list(
    State(state): State<AppState>,
    PathParams(username): PathParams<String>,
) -> ServiceResult<Json<Vec<Routine>>> {
    blocking(move || routines::list_routines(&state.store, &username))
        .await
        .map(Json)
}

pub(super) async fn handle_get(
    State(state): State<AppState>,
    PathParams(id): PathParams<String>,
) -> ServiceResult<Json<Routine>> {
    blocking(move || routines::get_routine(&state.store, &id)).await.map(Json)
}

pub(super) async fn handle_update(
    State(state): State<AppState>,
    PathParams(id): PathParams<String>,
    JsonBody(input): JsonBody<RoutineInput>,
) -> ServiceResult<Json<Routine>> {
    blocking(move || routines::update_routine(&state.store, &id, input))
        .await
        .map(Json)
}

pub(super) async fn handle_delete(
    State(state): State<AppState>,
    PathParams(id): PathParams<String>,
) -> ServiceResult<Json<MessageResponse>> {
    blocking(move || routines::delete_routine(&state.store, &id)).await.map(Json)
}

pub(super) async fn handle_get_progress(
    State(state): State<AppState>,
    PathParams(id): PathParams<String>,
) -> ServiceResult<Json<ProgressSummary>> {
    blocking(move || routines::get_progress(&state.store, &id)).await.map(Json)
}

pub(super) async fn handle_reset_progress(
    State(state): State<AppState>,
    PathParams(id): PathParams<String>,
) -> ServiceResult<Json<ProgressSummary>> {
    blocking(move || routines::reset_progress(&state.store, &id)).await.map(Json)
}

// The index is taken as text so a bad value gets its own message
fn parse_index(raw: &str) -> ServiceResult<usize> {
    raw.trim()
        .parse()
        .map_err(|_| ServiceError::validation("Índice de ejercicio inválido."))
}

async fn change_set(
    state: AppState,
    id: String,
    indice: &str,
    change: SetChange,
) -> ServiceResult<Json<ProgressSummary>> {
    let index = parse_index(indice)?;
    blocking(move || routines::change_set(&state.store, &id, index, change))
        .await
        .map(Json)
}

pub(super) async fn handle_increment(
    State(state): State<AppState>,
    PathParams((id, indice)): PathParams<(String, String)>,
) -> ServiceResult<Json<ProgressSummary>> {
    change_set(state, id, &indice, SetChange::Increment).await
}

pub(super) async fn handle_decrement(
    State(state): State<AppState>,
    PathParams((id, indice)): PathParams<(String, String)>,
) -> ServiceResult<Json<ProgressSummary>> {
    change_set(state, id, &indice, SetChange::Decrement).await
}
