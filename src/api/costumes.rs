//! Costume catalog endpoints

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
    models::costume::{Costume, CostumeInput, CostumeQuery},
};

use super::{CurrentUser, Message};

/// Costume list response
#[derive(Serialize, ToSchema)]
pub struct CostumeList {
    pub costumes: Vec<Costume>,
}

/// List costumes, optionally filtered by availability
#[utoipa::path(
    get,
    path = "/costumes",
    tag = "costumes",
    params(CostumeQuery),
    responses(
        (status = 200, description = "List of costumes", body = CostumeList)
    )
)]
pub async fn list_costumes(
    State(state): State<crate::AppState>,
    Query(query): Query<CostumeQuery>,
) -> AppResult<Json<CostumeList>> {
    let costumes = state.services.catalog.list_costumes(&query).await?;
    Ok(Json(CostumeList { costumes }))
}

/// Get costume details by ID
#[utoipa::path(
    get,
    path = "/costumes/{id}",
    tag = "costumes",
    params(
        ("id" = i32, Path, description = "Costume ID")
    ),
    responses(
        (status = 200, description = "Costume details", body = Costume),
        (status = 404, description = "Costume not registered")
    )
)]
pub async fn get_costume(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Costume>> {
    let costume = state.services.catalog.get_costume(id).await?;
    Ok(Json(costume))
}

/// Create a new costume
#[utoipa::path(
    post,
    path = "/costumes",
    tag = "costumes",
    security(("bearer_auth" = [])),
    request_body = CostumeInput,
    responses(
        (status = 201, description = "Costume created", body = Costume),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Costume already registered")
    )
)]
pub async fn create_costume(
    State(state): State<crate::AppState>,
    CurrentUser(_current_user): CurrentUser,
    Json(costume): Json<CostumeInput>,
) -> AppResult<(StatusCode, Json<Costume>)> {
    costume.validate()?;

    let created = state.services.catalog.create_costume(costume).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Replace an existing costume
#[utoipa::path(
    put,
    path = "/costumes/{id}",
    tag = "costumes",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Costume ID")
    ),
    request_body = CostumeInput,
    responses(
        (status = 200, description = "Costume updated", body = Costume),
        (status = 404, description = "Costume not registered"),
        (status = 409, description = "Name already taken")
    )
)]
pub async fn update_costume(
    State(state): State<crate::AppState>,
    CurrentUser(_current_user): CurrentUser,
    Path(id): Path<i32>,
    Json(costume): Json<CostumeInput>,
) -> AppResult<Json<Costume>> {
    costume.validate()?;

    let updated = state.services.catalog.update_costume(id, costume).await?;
    Ok(Json(updated))
}

/// Delete a costume
#[utoipa::path(
    delete,
    path = "/costumes/{id}",
    tag = "costumes",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Costume ID")
    ),
    responses(
        (status = 200, description = "Costume deleted", body = Message),
        (status = 404, description = "Costume not registered")
    )
)]
pub async fn delete_costume(
    State(state): State<crate::AppState>,
    CurrentUser(_current_user): CurrentUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Message>> {
    state.services.catalog.delete_costume(id).await?;
    Ok(Json(Message {
        message: "Costume deleted.".to_string(),
    }))
}
