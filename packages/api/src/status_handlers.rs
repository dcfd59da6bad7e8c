// ABOUTME: Health and template endpoints
// ABOUTME: Store-connectivity probe plus the built-in idea presets

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

use specforge_specs::templates::builtin_templates;

use crate::response::ApiResponse;
use crate::AppState;

/// Liveness check: healthy only when the store answers.
pub async fn status(State(state): State<AppState>) -> Response {
    match state.storage.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse::success(json!({
                "status": "healthy",
                "version": env!("CARGO_PKG_VERSION"),
            }))),
        )
            .into_response(),
        Err(e) => {
            error!("Store connectivity check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ApiResponse::error("Service unhealthy: store unreachable")),
            )
                .into_response()
        }
    }
}

/// List the built-in idea templates
pub async fn list_templates() -> impl IntoResponse {
    Json(ApiResponse::success(builtin_templates()))
}
