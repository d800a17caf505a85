//! API handlers for Fantasia REST endpoints

pub mod auth;
pub mod costumes;
pub mod customers;
pub mod health;
pub mod openapi;
pub mod rentals;
pub mod users;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{error::AppError, models::user::User, AppState};

/// Plain acknowledgement response
#[derive(Serialize, ToSchema)]
pub struct Message {
    pub message: String,
}

/// Extractor for the authenticated principal behind a bearer token.
///
/// The token is validated and the subject re-loaded from the store, so a
/// user deleted after the token was issued no longer authenticates.
pub struct CurrentUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        // Get the Authorization header
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Unauthenticated("Missing authorization header".to_string()))?;

        // Check for Bearer token
        if !auth_header.starts_with("Bearer ") {
            return Err(AppError::Unauthenticated(
                "Invalid authorization header format".to_string(),
            ));
        }

        let token = &auth_header[7..];

        let user = state.services.users.authorize(token).await?;

        Ok(CurrentUser(user))
    }
}
