//! Error types for Fantasia server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid reference: {0}")]
    InvalidReference(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl AppError {
    fn status_and_label(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Unauthenticated(_) => (StatusCode::UNAUTHORIZED, "Unauthenticated"),
            // The permission failure surfaces as a plain 400, matching the
            // contract the clients already rely on.
            AppError::PermissionDenied(_) => (StatusCode::BAD_REQUEST, "PermissionDenied"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "NotFound"),
            AppError::Conflict(_) => (StatusCode::CONFLICT, "Conflict"),
            AppError::InvalidReference(_) => (StatusCode::BAD_REQUEST, "InvalidReference"),
            AppError::InvalidState(_) => (StatusCode::BAD_REQUEST, "InvalidState"),
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "Validation"),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BadRequest"),
            AppError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, label) = self.status_and_label();

        let message = match &self {
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "Database error".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "Internal server error".to_string()
            }
            AppError::Unauthenticated(msg)
            | AppError::PermissionDenied(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg)
            | AppError::InvalidReference(msg)
            | AppError::InvalidState(msg)
            | AppError::Validation(msg)
            | AppError::BadRequest(msg) => msg.clone(),
        };

        let body = Json(ErrorResponse {
            error: label.to_string(),
            message,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permission_denied_maps_to_bad_request() {
        let response =
            AppError::PermissionDenied("Not enough permissions".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn conflict_maps_to_409() {
        let response = AppError::Conflict("Costume unavailable.".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn unauthenticated_maps_to_401() {
        let response =
            AppError::Unauthenticated("Could not validate credentials".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn missing_entities_map_to_404() {
        let response = AppError::NotFound("Rental not registered.".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
