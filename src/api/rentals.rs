//! Rental workflow endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::rental::{CreateRental, RentalDetails, RentalPatch, RentalQuery},
};

use super::{CurrentUser, Message};

/// Rental list response
#[derive(Serialize, ToSchema)]
pub struct RentalList {
    pub rentals: Vec<RentalDetails>,
}

/// List rentals with their related entities
#[utoipa::path(
    get,
    path = "/rental",
    tag = "rental",
    security(("bearer_auth" = [])),
    params(RentalQuery),
    responses(
        (status = 200, description = "List of rentals", body = RentalList),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_rentals(
    State(state): State<crate::AppState>,
    CurrentUser(_current_user): CurrentUser,
    Query(query): Query<RentalQuery>,
) -> AppResult<Json<RentalList>> {
    let rentals = state.services.rentals.list_rentals(&query).await?;
    Ok(Json(RentalList { rentals }))
}

/// Get rental details by ID
#[utoipa::path(
    get,
    path = "/rental/{id}",
    tag = "rental",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Rental ID")
    ),
    responses(
        (status = 200, description = "Rental details", body = RentalDetails),
        (status = 404, description = "Rental not registered")
    )
)]
pub async fn get_rental(
    State(state): State<crate::AppState>,
    CurrentUser(_current_user): CurrentUser,
    Path(id): Path<i32>,
) -> AppResult<Json<RentalDetails>> {
    let rental = state.services.rentals.get_rental(id).await?;
    Ok(Json(rental))
}

/// Rent a costume to a customer.
///
/// The acting user is recorded on the rental; the costume must be available
/// and becomes unavailable atomically with the creation.
#[utoipa::path(
    post,
    path = "/rental",
    tag = "rental",
    security(("bearer_auth" = [])),
    request_body = CreateRental,
    responses(
        (status = 201, description = "Rental created", body = RentalDetails),
        (status = 400, description = "Costume or customer not registered"),
        (status = 409, description = "Costume unavailable")
    )
)]
pub async fn create_rental(
    State(state): State<crate::AppState>,
    CurrentUser(current_user): CurrentUser,
    Json(rental): Json<CreateRental>,
) -> AppResult<(StatusCode, Json<RentalDetails>)> {
    let created = state
        .services
        .rentals
        .create_rental(current_user.id, rental)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Partially update a rental's dates
#[utoipa::path(
    patch,
    path = "/rental/{id}",
    tag = "rental",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Rental ID")
    ),
    request_body = RentalPatch,
    responses(
        (status = 200, description = "Rental updated", body = RentalDetails),
        (status = 400, description = "Return date before rental date"),
        (status = 404, description = "Rental not registered")
    )
)]
pub async fn patch_rental(
    State(state): State<crate::AppState>,
    CurrentUser(_current_user): CurrentUser,
    Path(id): Path<i32>,
    Json(patch): Json<RentalPatch>,
) -> AppResult<Json<RentalDetails>> {
    let updated = state.services.rentals.patch_rental(id, patch).await?;
    Ok(Json(updated))
}

/// Delete a rental, restoring the costume to available
#[utoipa::path(
    delete,
    path = "/rental/{id}",
    tag = "rental",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Rental ID")
    ),
    responses(
        (status = 200, description = "Rental deleted", body = Message),
        (status = 404, description = "Rental not registered")
    )
)]
pub async fn delete_rental(
    State(state): State<crate::AppState>,
    CurrentUser(_current_user): CurrentUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Message>> {
    state.services.rentals.delete_rental(id).await?;
    Ok(Json(Message {
        message: "Rental register has been deleted successfully.".to_string(),
    }))
}
