//! User management endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    error::AppResult,
    models::user::{User, UserInput, UserQuery},
};

use super::{CurrentUser, Message};

/// User list response
#[derive(Serialize, ToSchema)]
pub struct UserList {
    pub users: Vec<User>,
}

/// List users
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    params(UserQuery),
    responses(
        (status = 200, description = "List of users", body = UserList)
    )
)]
pub async fn list_users(
    State(state): State<crate::AppState>,
    Query(query): Query<UserQuery>,
) -> AppResult<Json<UserList>> {
    let users = state.services.users.list_users(&query).await?;
    Ok(Json(UserList { users }))
}

/// Get user details by ID
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "users",
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User details", body = User),
        (status = 404, description = "User not registered")
    )
)]
pub async fn get_user(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<User>> {
    let user = state.services.users.get_by_id(id).await?;
    Ok(Json(user))
}

/// Register a new user.
///
/// Open endpoint so anyone can exercise the API's permission rules.
#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    request_body = UserInput,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn create_user(
    State(state): State<crate::AppState>,
    Json(user): Json<UserInput>,
) -> AppResult<(StatusCode, Json<User>)> {
    user.validate()?;

    let created = state.services.users.create_user(user).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Replace an existing user (self or admin only)
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "users",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    request_body = UserInput,
    responses(
        (status = 200, description = "User updated", body = User),
        (status = 400, description = "Not enough permissions"),
        (status = 404, description = "User not registered"),
        (status = 409, description = "Email already exists")
    )
)]
pub async fn update_user(
    State(state): State<crate::AppState>,
    CurrentUser(current_user): CurrentUser,
    Path(id): Path<i32>,
    Json(user): Json<UserInput>,
) -> AppResult<Json<User>> {
    current_user.require_self_or_admin(id)?;
    user.validate()?;

    let updated = state.services.users.update_user(&current_user, id, user).await?;
    Ok(Json(updated))
}

/// Delete a user (self or admin only)
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "users",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User deleted", body = Message),
        (status = 400, description = "Not enough permissions"),
        (status = 404, description = "User not registered")
    )
)]
pub async fn delete_user(
    State(state): State<crate::AppState>,
    CurrentUser(current_user): CurrentUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Message>> {
    current_user.require_self_or_admin(id)?;

    state.services.users.delete_user(id).await?;
    Ok(Json(Message {
        message: "User deleted.".to_string(),
    }))
}
