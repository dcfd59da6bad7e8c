// ABOUTME: HTTP request handlers for spec operations
// ABOUTME: Generation, listing, retrieval, partial update, delete, and export

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use tracing::info;

use specforge_specs::export::{export_file_name, spec_to_markdown};
use specforge_specs::pagination::Pagination;
use specforge_specs::validator::{
    validate_spec_id, FieldError, GenerateSpecPayload, ListSpecsQuery, UpdateSpecPayload,
};
use specforge_specs::SpecError;

use crate::response::{ApiError, ApiResponse};
use crate::AppState;

// Malformed bodies and query strings take the same field-error path as
// schema failures, so clients always see the standard envelope.
fn invalid_body(rejection: JsonRejection) -> ApiError {
    ApiError(SpecError::Validation(vec![FieldError::new(
        "body",
        rejection.body_text(),
    )]))
}

fn invalid_query(rejection: QueryRejection) -> ApiError {
    ApiError(SpecError::Validation(vec![FieldError::new(
        "query",
        rejection.body_text(),
    )]))
}

/// Generate a spec from a product idea and persist the full entity graph
pub async fn generate_spec(
    State(state): State<AppState>,
    payload: Result<Json<GenerateSpecPayload>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = payload.map_err(invalid_body)?;
    let request = payload.validate()?;

    info!("Generating spec for '{}'", request.title);

    let ai_output = state.generator.generate(&request).await?;
    let spec = state.storage.create_from_ai(&ai_output, &request).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(json!({ "specId": spec.id }))),
    ))
}

/// List spec summaries, paginated and optionally filtered by product type
pub async fn list_specs(
    State(state): State<AppState>,
    query: Result<Query<ListSpecsQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(query) = query.map_err(invalid_query)?;

    info!("Listing specs (page: {})", query.pagination().page());

    let (specs, total) = state.storage.list_specs(&query).await?;
    let pagination = Pagination::new(&query.pagination(), total);

    Ok(Json(ApiResponse::success_with_meta(
        specs,
        json!({ "pagination": pagination }),
    )))
}

/// Get a single spec with all children expanded
pub async fn get_spec(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    validate_spec_id(&id)?;

    let spec = state.storage.get_spec(&id).await?;
    Ok(Json(ApiResponse::success(spec)))
}

/// Apply a partial update to a spec's mutable scalar fields
pub async fn update_spec(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateSpecPayload>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    validate_spec_id(&id)?;
    let Json(payload) = payload.map_err(invalid_body)?;
    let update = payload.validate()?;

    info!("Updating spec {}", id);

    let spec = state.storage.update_spec(&id, &update).await?;
    Ok(Json(ApiResponse::success(spec)))
}

/// Delete a spec and everything it owns
pub async fn delete_spec(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    validate_spec_id(&id)?;

    info!("Deleting spec {}", id);

    state.storage.delete_spec(&id).await?;
    Ok(Json(ApiResponse::success(json!({ "deleted": true }))))
}

/// Export a spec as a flat markdown document
pub async fn export_spec(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    validate_spec_id(&id)?;

    let spec = state.storage.get_spec(&id).await?;
    let markdown = spec_to_markdown(&spec);
    let file_name = export_file_name(&spec);

    Ok(Json(ApiResponse::success(json!({
        "fileName": file_name,
        "markdown": markdown,
    }))))
}
