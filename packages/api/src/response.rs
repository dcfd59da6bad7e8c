// ABOUTME: Shared API response envelope and error translation
// ABOUTME: One exhaustive mapping from spec errors to transport status codes

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json as ResponseJson, Response};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::error;

use specforge_specs::validator::FieldError;
use specforge_specs::SpecError;

/// Standard API response wrapper: `{success, data?, error?, details?, meta?}`
#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        ApiResponse {
            success: true,
            data: Some(data),
            error: None,
            details: None,
            meta: None,
        }
    }

    pub fn success_with_meta(data: T, meta: Value) -> Self {
        ApiResponse {
            success: true,
            data: Some(data),
            error: None,
            details: None,
            meta: Some(meta),
        }
    }
}

impl ApiResponse<()> {
    pub fn error(message: impl Into<String>) -> Self {
        ApiResponse {
            success: false,
            data: None,
            error: Some(message.into()),
            details: None,
            meta: None,
        }
    }

    pub fn error_with_details(message: impl Into<String>, details: Value) -> Self {
        ApiResponse {
            success: false,
            data: None,
            error: Some(message.into()),
            details: Some(details),
            meta: None,
        }
    }
}

/// Error wrapper giving spec errors an HTTP rendering. Handlers return
/// this; `?` converts through the `From` impls below.
pub struct ApiError(pub SpecError);

impl From<SpecError> for ApiError {
    fn from(err: SpecError) -> Self {
        ApiError(err)
    }
}

impl From<Vec<FieldError>> for ApiError {
    fn from(errors: Vec<FieldError>) -> Self {
        ApiError(SpecError::Validation(errors))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self.0 {
            SpecError::Validation(fields) => (
                StatusCode::BAD_REQUEST,
                ApiResponse::error_with_details("Validation failed", json!(fields)),
            ),
            SpecError::NotFound(entity) => (
                StatusCode::NOT_FOUND,
                ApiResponse::error(format!("{} not found", entity)),
            ),
            SpecError::Conflict(key) => (
                StatusCode::CONFLICT,
                ApiResponse::error_with_details("Duplicate key error", json!({ "key": key })),
            ),
            SpecError::Generation(cause) => {
                error!("Spec generation failed: {}", cause);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiResponse::error("Failed to generate product specification"),
                )
            }
            SpecError::Database(e) => {
                error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiResponse::error("Internal server error"),
                )
            }
            SpecError::Migration(e) => {
                error!("Migration error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiResponse::error("Internal server error"),
                )
            }
            SpecError::Serialization(e) => {
                error!("Serialization error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiResponse::error("Internal server error"),
                )
            }
            SpecError::Io(e) => {
                error!("I/O error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiResponse::error("Internal server error"),
                )
            }
        };

        (status, ResponseJson(body)).into_response()
    }
}
