//! GymPal HTTP API
//!
//! The JSON routes the mobile client calls. Handlers are thin wrappers over
//! `crate::tools`; store work runs on the blocking pool.

mod error;
mod extract;
mod nutrition;
mod routines;
mod users;

use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::{ServiceError, ServiceResult};
use crate::store::DataStore;
use crate::tools::status::{GympalStatus, StatusTracker};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub store: DataStore,
    pub status: Arc<StatusTracker>,
}

impl AppState {
    pub fn new(store: DataStore) -> Self {
        Self {
            status: Arc::new(StatusTracker::new(store.clone())),
            store,
        }
    }
}

/// CORS for the configured origins. An empty list allows any origin.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| HeaderValue::from_str(o).ok())
        .collect();

    let allow_origin = if parsed.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(parsed)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
}

pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/api/register", post(users::handle_register))
        .route("/api/login", post(users::handle_login))
        .route("/api/users", get(users::handle_list_users))
        .route("/api/usuario/{id}", get(users::handle_get_user))
        .route("/api/actualizar-usuario", post(users::handle_update_user))
        .route("/api/configuracion", post(users::handle_save_profile))
        .route("/api/configuracion/{usuario}", get(users::handle_get_profile))
        .route("/api/rutinas", post(routines::handle_create))
        .route("/api/rutinas/{username}", get(routines::handle_list))
        .route(
            "/api/rutina/{id}",
            get(routines::handle_get)
                .put(routines::handle_update)
                .delete(routines::handle_delete),
        )
        .route(
            "/api/rutina/{id}/progreso",
            get(routines::handle_get_progress).delete(routines::handle_reset_progress),
        )
        .route(
            "/api/rutina/{id}/progreso/{indice}/incrementar",
            post(routines::handle_increment),
        )
        .route(
            "/api/rutina/{id}/progreso/{indice}/decrementar",
            post(routines::handle_decrement),
        )
        .route("/api/alimentacion/calcular", post(nutrition::handle_calculate))
        .route(
            "/api/alimentacion/{objetivo}",
            get(nutrition::handle_recommendations),
        )
        .route("/api/plan/{usuario}", get(nutrition::handle_meal_plan))
        .route("/api/alimentos", get(nutrition::handle_catalog))
        .route("/health", get(handle_health))
        .route("/api/status", get(handle_status))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn handle_health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn handle_status(State(state): State<AppState>) -> ServiceResult<Json<GympalStatus>> {
    blocking(move || Ok(state.status.get_status())).await.map(Json)
}

/// Run a store operation where its file I/O and lock wait cannot stall the
/// async workers
async fn blocking<T, F>(f: F) -> ServiceResult<T>
where
    F: FnOnce() -> ServiceResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ServiceError::Internal(format!("store task failed: {}", e)))?
}
