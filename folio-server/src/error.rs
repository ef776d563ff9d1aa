//! Outcome-to-response translation.
//!
//! Client-fault outcomes (validation, missing keys, empty updates) map to
//! 4xx responses carrying the reason; everything else maps to a generic
//! 500 with the full detail recorded server-side, never leaked.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use folio_core::error::FolioError;
use folio_models::validate::ValidationErrors;

/// Wrapper turning repository outcomes into HTTP responses.
#[derive(Debug)]
pub struct ApiError(FolioError);

impl From<FolioError> for ApiError {
    fn from(e: FolioError) -> Self {
        Self(e)
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(e: ValidationErrors) -> Self {
        Self(FolioError::from(e))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            FolioError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "detail": "validation failed", "errors": errors })),
            )
                .into_response(),
            FolioError::NotFound(what) => (
                StatusCode::NOT_FOUND,
                Json(json!({ "detail": format!("{what} not found") })),
            )
                .into_response(),
            FolioError::NoChange => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "detail": "no changes made" })),
            )
                .into_response(),
            other => {
                tracing::error!("request failed: {other}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "detail": "internal server error" })),
                )
                    .into_response()
            }
        }
    }
}
