// ABOUTME: HTTP API layer for Specforge providing REST endpoints and routing
// ABOUTME: Integration layer over the spec domain package

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get, patch, post};
use axum::{Json, Router};

use specforge_specs::{SpecGenerator, SpecStorage};

pub mod response;
pub mod spec_handlers;
pub mod status_handlers;

use response::ApiResponse;

/// Shared state for API handlers: the injected store handle and the
/// generation adapter.
#[derive(Clone)]
pub struct AppState {
    pub storage: SpecStorage,
    pub generator: SpecGenerator,
}

impl AppState {
    pub fn new(storage: SpecStorage, generator: SpecGenerator) -> Self {
        Self { storage, generator }
    }
}

/// Creates the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/generate", post(spec_handlers::generate_spec))
        .route("/api/specs", get(spec_handlers::list_specs))
        .route("/api/specs/{id}", get(spec_handlers::get_spec))
        .route("/api/specs/{id}", patch(spec_handlers::update_spec))
        .route("/api/specs/{id}", delete(spec_handlers::delete_spec))
        .route("/api/specs/{id}/export", get(spec_handlers::export_spec))
        .route("/api/templates", get(status_handlers::list_templates))
        .route("/api/status", get(status_handlers::status))
        .fallback(not_found)
        .with_state(state)
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::error("Route not found")),
    )
}
