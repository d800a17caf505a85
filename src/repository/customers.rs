//! Customers repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::customer::{Customer, CustomerInput, CustomerQuery},
};

#[derive(Clone)]
pub struct CustomersRepository {
    pool: Pool<Postgres>,
}

impl CustomersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get customer by cpf
    pub async fn get_by_cpf(&self, cpf: &str) -> AppResult<Customer> {
        sqlx::query_as::<_, Customer>(
            "SELECT id, cpf, name, email, phone_number, address FROM customers WHERE cpf = $1",
        )
        .bind(cpf)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Customer not registered.".to_string()))
    }

    /// List customers in insertion order
    pub async fn list(&self, query: &CustomerQuery) -> AppResult<Vec<Customer>> {
        let customers = sqlx::query_as::<_, Customer>(
            r#"
            SELECT id, cpf, name, email, phone_number, address
            FROM customers
            ORDER BY id
            OFFSET $1 LIMIT $2
            "#,
        )
        .bind(query.skip.unwrap_or(0))
        .bind(query.limit.unwrap_or(100))
        .fetch_all(&self.pool)
        .await?;

        Ok(customers)
    }

    /// Check if a cpf is already registered
    pub async fn cpf_exists(&self, cpf: &str) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM customers WHERE cpf = $1)")
                .bind(cpf)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    /// Create a new customer
    pub async fn create(&self, customer: &CustomerInput) -> AppResult<Customer> {
        let created = sqlx::query_as::<_, Customer>(
            r#"
            INSERT INTO customers (cpf, name, email, phone_number, address)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, cpf, name, email, phone_number, address
            "#,
        )
        .bind(&customer.cpf)
        .bind(&customer.name)
        .bind(&customer.email)
        .bind(&customer.phone_number)
        .bind(&customer.address)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Replace every mutable field of the customer addressed by cpf
    pub async fn update_by_cpf(&self, cpf: &str, customer: &CustomerInput) -> AppResult<Customer> {
        let updated = sqlx::query_as::<_, Customer>(
            r#"
            UPDATE customers
            SET cpf = $1, name = $2, email = $3, phone_number = $4, address = $5
            WHERE cpf = $6
            RETURNING id, cpf, name, email, phone_number, address
            "#,
        )
        .bind(&customer.cpf)
        .bind(&customer.name)
        .bind(&customer.email)
        .bind(&customer.phone_number)
        .bind(&customer.address)
        .bind(cpf)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Customer not registered.".to_string()))?;

        Ok(updated)
    }

    /// Delete the customer addressed by cpf
    pub async fn delete_by_cpf(&self, cpf: &str) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM customers WHERE cpf = $1")
            .bind(cpf)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Customer not registered.".to_string()));
        }

        Ok(())
    }
}
