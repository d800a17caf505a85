//! Rentals repository: the costume availability state machine.
//!
//! Every mutating operation here runs inside one explicit transaction with a
//! row-level lock on the costume (or rental) being transitioned, so a failure
//! at any step rolls the whole unit of work back and concurrent rentals of
//! the same costume are serialized.

use chrono::{Duration, Utc};
use sqlx::{postgres::PgRow, Pool, Postgres, Row};

use crate::{
    error::{AppError, AppResult},
    models::{
        costume::{Availability, Costume},
        customer::Customer,
        rental::{CreateRental, Rental, RentalDetails, RentalPatch, RentalQuery, DEFAULT_RENTAL_DAYS},
        user::UserShort,
    },
};

const DETAILS_QUERY: &str = r#"
    SELECT r.id, r.user_id, r.customer_id, r.costume_id, r.rental_date, r.return_date,
           co.name AS costume_name, co.description AS costume_description,
           co.fee AS costume_fee, co.availability AS costume_availability,
           cu.cpf AS customer_cpf, cu.name AS customer_name, cu.email AS customer_email,
           cu.phone_number AS customer_phone_number, cu.address AS customer_address,
           u.name AS user_name, u.email AS user_email, u.is_admin AS user_is_admin
    FROM rental r
    JOIN costumes co ON r.costume_id = co.id
    JOIN customers cu ON r.customer_id = cu.id
    JOIN users u ON r.user_id = u.id
"#;

#[derive(Clone)]
pub struct RentalsRepository {
    pool: Pool<Postgres>,
}

impl RentalsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get a rental with its related entities denormalized
    pub async fn get_details_by_id(&self, id: i32) -> AppResult<RentalDetails> {
        let row = sqlx::query(&format!("{} WHERE r.id = $1", DETAILS_QUERY))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Rental not registered.".to_string()))?;

        Ok(details_from_row(&row))
    }

    /// List rentals with related entities denormalized, in insertion order
    pub async fn list(&self, query: &RentalQuery) -> AppResult<Vec<RentalDetails>> {
        let rows = sqlx::query(&format!(
            "{} ORDER BY r.id OFFSET $1 LIMIT $2",
            DETAILS_QUERY
        ))
        .bind(query.skip.unwrap_or(0))
        .bind(query.limit.unwrap_or(100))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(details_from_row).collect())
    }

    /// Create a rental, flipping the costume to unavailable in the same
    /// transaction. The `FOR UPDATE` lock on the costume row serializes
    /// concurrent creates: the second caller sees the flipped availability
    /// and gets a conflict.
    pub async fn create(&self, user_id: i32, rental: &CreateRental) -> AppResult<RentalDetails> {
        let mut tx = self.pool.begin().await?;

        let costume = sqlx::query_as::<_, Costume>(
            r#"
            SELECT id, name, description, fee, availability
            FROM costumes
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(rental.costume_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::InvalidReference("Costume not registered.".to_string()))?;

        if costume.availability == Availability::Unavailable {
            return Err(AppError::Conflict("Costume unavailable.".to_string()));
        }

        let customer_exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM customers WHERE id = $1)")
                .bind(rental.customer_id)
                .fetch_one(&mut *tx)
                .await?;

        if !customer_exists {
            return Err(AppError::InvalidReference("Customer not registered.".to_string()));
        }

        sqlx::query("UPDATE costumes SET availability = $1 WHERE id = $2")
            .bind(Availability::Unavailable)
            .bind(rental.costume_id)
            .execute(&mut *tx)
            .await?;

        let rental_date = Utc::now();
        let return_date = rental_date + Duration::days(DEFAULT_RENTAL_DAYS);

        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO rental (user_id, customer_id, costume_id, rental_date, return_date)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(user_id)
        .bind(rental.customer_id)
        .bind(rental.costume_id)
        .bind(rental_date)
        .bind(return_date)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        self.get_details_by_id(id).await
    }

    /// Apply a partial update. The patched row is validated before the
    /// UPDATE is issued, so an invalid date range never reaches storage.
    pub async fn patch(&self, id: i32, patch: &RentalPatch) -> AppResult<RentalDetails> {
        let mut tx = self.pool.begin().await?;

        let rental = sqlx::query_as::<_, Rental>(
            r#"
            SELECT id, user_id, customer_id, costume_id, rental_date, return_date
            FROM rental
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Rental not registered.".to_string()))?;

        let updated = rental.apply_patch(patch)?;

        sqlx::query("UPDATE rental SET rental_date = $1, return_date = $2 WHERE id = $3")
            .bind(updated.rental_date)
            .bind(updated.return_date)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        self.get_details_by_id(id).await
    }

    /// Delete a rental and restore the referenced costume to available.
    /// Both writes commit together or not at all.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let rental = sqlx::query_as::<_, Rental>(
            r#"
            SELECT id, user_id, customer_id, costume_id, rental_date, return_date
            FROM rental
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Rental not registered.".to_string()))?;

        sqlx::query("UPDATE costumes SET availability = $1 WHERE id = $2")
            .bind(Availability::Available)
            .bind(rental.costume_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM rental WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }
}

/// Compose the read-side DTO from one joined row
fn details_from_row(row: &PgRow) -> RentalDetails {
    RentalDetails {
        id: row.get("id"),
        rental_date: row.get("rental_date"),
        return_date: row.get("return_date"),
        costume: Costume {
            id: row.get("costume_id"),
            name: row.get("costume_name"),
            description: row.get("costume_description"),
            fee: row.get("costume_fee"),
            availability: row.get("costume_availability"),
        },
        customer: Customer {
            id: row.get("customer_id"),
            cpf: row.get("customer_cpf"),
            name: row.get("customer_name"),
            email: row.get("customer_email"),
            phone_number: row.get("customer_phone_number"),
            address: row.get("customer_address"),
        },
        user: UserShort {
            id: row.get("user_id"),
            name: row.get("user_name"),
            email: row.get("user_email"),
            is_admin: row.get("user_is_admin"),
        },
    }
}
