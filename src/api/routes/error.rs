//! API error handling utilities.
//!
//! Every failure leaves the API as `{"error": <kind>, "message": <text>}`.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};
use utoipa::ToSchema;

use crate::services::{IngredientError, RecipeError};

pub const VALIDATION_ERROR: &str = "validation_error";
pub const NOT_FOUND: &str = "not_found";
pub const INTERNAL_ERROR: &str = "internal_error";
pub const SERVICE_UNAVAILABLE: &str = "service_unavailable";

/// Error body returned by every endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Machine-readable kind
    #[schema(example = "not_found")]
    pub error: String,
    pub message: String,
}

/// API error response
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub kind: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            kind: VALIDATION_ERROR,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            kind: NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            kind: INTERNAL_ERROR,
            message: message.into(),
        }
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::SERVICE_UNAVAILABLE,
            kind: SERVICE_UNAVAILABLE,
            message: message.into(),
        }
    }

    pub fn invalid_id() -> Self {
        Self::validation("Invalid ingredient ID")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = self.status.as_u16(), kind = self.kind, message = %self.message, "Request failed");
        } else {
            warn!(status = self.status.as_u16(), kind = self.kind, message = %self.message, "Request rejected");
        }

        let body = ErrorResponse {
            error: self.kind.to_string(),
            message: self.message,
        };

        (self.status, axum::Json(body)).into_response()
    }
}

impl From<IngredientError> for ApiError {
    fn from(err: IngredientError) -> Self {
        match err {
            IngredientError::Validation(message) => ApiError::validation(message),
            IngredientError::NotFound { .. } => ApiError::not_found(err.to_string()),
            IngredientError::Storage { .. } => ApiError::internal(err.to_string()),
        }
    }
}

impl From<RecipeError> for ApiError {
    fn from(err: RecipeError) -> Self {
        if err.is_unavailable() {
            warn!(error = %err, "Recipe generation backend unavailable");
            ApiError::service_unavailable("Recipe suggestion service is currently unavailable")
        } else {
            ApiError::internal(err.to_string())
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::validation(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(_: PathRejection) -> Self {
        ApiError::invalid_id()
    }
}
