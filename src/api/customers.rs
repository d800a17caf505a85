//! Customer registry endpoints

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
    models::customer::{Customer, CustomerInput, CustomerQuery},
};

use super::{CurrentUser, Message};

/// Customer list response
#[derive(Serialize, ToSchema)]
pub struct CustomerList {
    pub customers: Vec<Customer>,
}

/// List customers
#[utoipa::path(
    get,
    path = "/customers",
    tag = "customers",
    security(("bearer_auth" = [])),
    params(CustomerQuery),
    responses(
        (status = 200, description = "List of customers", body = CustomerList),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_customers(
    State(state): State<crate::AppState>,
    CurrentUser(_current_user): CurrentUser,
    Query(query): Query<CustomerQuery>,
) -> AppResult<Json<CustomerList>> {
    let customers = state.services.customers.list_customers(&query).await?;
    Ok(Json(CustomerList { customers }))
}

/// Get customer details by cpf
#[utoipa::path(
    get,
    path = "/customers/{cpf}",
    tag = "customers",
    security(("bearer_auth" = [])),
    params(
        ("cpf" = String, Path, description = "Customer cpf")
    ),
    responses(
        (status = 200, description = "Customer details", body = Customer),
        (status = 404, description = "Customer not registered")
    )
)]
pub async fn get_customer(
    State(state): State<crate::AppState>,
    CurrentUser(_current_user): CurrentUser,
    Path(cpf): Path<String>,
) -> AppResult<Json<Customer>> {
    let customer = state.services.customers.get_customer(&cpf).await?;
    Ok(Json(customer))
}

/// Register a new customer
#[utoipa::path(
    post,
    path = "/customers",
    tag = "customers",
    security(("bearer_auth" = [])),
    request_body = CustomerInput,
    responses(
        (status = 201, description = "Customer created", body = Customer),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Customer already registered")
    )
)]
pub async fn create_customer(
    State(state): State<crate::AppState>,
    CurrentUser(_current_user): CurrentUser,
    Json(customer): Json<CustomerInput>,
) -> AppResult<(StatusCode, Json<Customer>)> {
    customer.validate()?;

    let created = state.services.customers.create_customer(customer).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Replace the customer addressed by cpf
#[utoipa::path(
    put,
    path = "/customers/{cpf}",
    tag = "customers",
    security(("bearer_auth" = [])),
    params(
        ("cpf" = String, Path, description = "Customer cpf")
    ),
    request_body = CustomerInput,
    responses(
        (status = 200, description = "Customer updated", body = Customer),
        (status = 404, description = "Customer not registered"),
        (status = 409, description = "cpf already taken")
    )
)]
pub async fn update_customer(
    State(state): State<crate::AppState>,
    CurrentUser(_current_user): CurrentUser,
    Path(cpf): Path<String>,
    Json(customer): Json<CustomerInput>,
) -> AppResult<Json<Customer>> {
    customer.validate()?;

    let updated = state
        .services
        .customers
        .update_customer(&cpf, customer)
        .await?;
    Ok(Json(updated))
}

/// Delete the customer addressed by cpf
#[utoipa::path(
    delete,
    path = "/customers/{cpf}",
    tag = "customers",
    security(("bearer_auth" = [])),
    params(
        ("cpf" = String, Path, description = "Customer cpf")
    ),
    responses(
        (status = 200, description = "Customer deleted", body = Message),
        (status = 404, description = "Customer not registered")
    )
)]
pub async fn delete_customer(
    State(state): State<crate::AppState>,
    CurrentUser(_current_user): CurrentUser,
    Path(cpf): Path<String>,
) -> AppResult<Json<Message>> {
    state.services.customers.delete_customer(&cpf).await?;
    Ok(Json(Message {
        message: "Customer deleted.".to_string(),
    }))
}
