//! Authentication endpoints

use axum::{extract::State, Form, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppResult;

use super::CurrentUser;

/// OAuth2-style password login form
#[derive(Deserialize, ToSchema)]
pub struct AccessTokenForm {
    /// The user's email
    pub username: String,
    pub password: String,
}

/// Bearer token response
#[derive(Serialize, ToSchema)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
}

impl Token {
    fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}

/// Exchange email and password for a bearer token
#[utoipa::path(
    post,
    path = "/auth/token",
    tag = "auth",
    request_body(content = AccessTokenForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Token issued", body = Token),
        (status = 400, description = "Incorrect password"),
        (status = 404, description = "User not registered")
    )
)]
pub async fn login_for_access_token(
    State(state): State<crate::AppState>,
    Form(form): Form<AccessTokenForm>,
) -> AppResult<Json<Token>> {
    let access_token = state
        .services
        .users
        .authenticate(&form.username, &form.password)
        .await?;

    Ok(Json(Token::bearer(access_token)))
}

/// Re-issue a token for the authenticated principal
#[utoipa::path(
    post,
    path = "/auth/refresh_token",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Token re-issued", body = Token),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn refresh_access_token(
    State(state): State<crate::AppState>,
    CurrentUser(user): CurrentUser,
) -> AppResult<Json<Token>> {
    let access_token = state.services.users.refresh_token(&user)?;

    Ok(Json(Token::bearer(access_token)))
}
