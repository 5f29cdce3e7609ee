//! User and profile handlers

use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use super::extract::{JsonBody, PathParams, QueryParams};
use super::{blocking, AppState};
use crate::error::{ServiceError, ServiceResult};
use crate::models::UserSummary;
use crate::nutrition::ActivityLevel;
use crate::tools::profile::{self, ProfileRequest, ProfileResponse};
use crate::tools::users::{
    self, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, UpdateUserRequest,
};
use crate::tools::MessageResponse;

pub(super) async fn handle_register(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<RegisterRequest>,
) -> ServiceResult<Json<RegisterResponse>> {
    blocking(move || users::register(&state.store, req)).await.map(Json)
}

pub(super) async fn handle_login(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> ServiceResult<Json<LoginResponse>> {
    blocking(move || users::login(&state.store, req)).await.map(Json)
}

pub(super) async fn handle_list_users(
    State(state): State<AppState>,
) -> ServiceResult<Json<Vec<UserSummary>>> {
    blocking(move || users::list_users(&state.store)).await.map(Json)
}

pub(super) async fn handle_get_user(
    State(state): State<AppState>,
    PathParams(id): PathParams<String>,
) -> ServiceResult<Json<UserSummary>> {
    blocking(move || users::get_user(&state.store, &id)).await.map(Json)
}

pub(super) async fn handle_update_user(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<UpdateUserRequest>,
) -> ServiceResult<Json<MessageResponse>> {
    blocking(move || users::update_user(&state.store, req)).await.map(Json)
}

pub(super) async fn handle_save_profile(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<ProfileRequest>,
) -> ServiceResult<Json<MessageResponse>> {
    blocking(move || profile::save_profile(&state.store, req)).await.map(Json)
}

#[derive(Debug, Deserialize)]
pub(super) struct ProfileQuery {
    actividad: Option<String>,
}

pub(super) async fn handle_get_profile(
    State(state): State<AppState>,
    PathParams(usuario): PathParams<String>,
    QueryParams(query): QueryParams<ProfileQuery>,
) -> ServiceResult<Json<ProfileResponse>> {
    let activity = match query.actividad.as_deref() {
        None => None,
        Some(raw) => Some(
            ActivityLevel::from_str(raw)
                .ok_or_else(|| ServiceError::validation("Nivel de actividad no válido."))?,
        ),
    };
    blocking(move || profile::get_profile(&state.store, &usuario, activity))
        .await
        .map(Json)
}
