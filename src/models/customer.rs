//! Customer model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Customer model from database, keyed externally by cpf
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Customer {
    pub id: i32,
    /// Brazilian national taxpayer ID, 11 characters, unique
    pub cpf: String,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub address: String,
}

/// Customer create/replace request (PUT replaces every mutable field)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CustomerInput {
    #[validate(length(equal = 11, message = "cpf must be exactly 11 characters"))]
    pub cpf: String,
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(max = 11, message = "Phone number must be at most 11 characters"))]
    pub phone_number: String,
    pub address: String,
}

/// Customer list query parameters
#[derive(Debug, Deserialize, IntoParams)]
pub struct CustomerQuery {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}
