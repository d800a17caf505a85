//! Users repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::user::{User, UserInput, UserQuery},
};

#[derive(Clone)]
pub struct UsersRepository {
    pool: Pool<Postgres>,
}

impl UsersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "SELECT id, name, email, password, phone_number, is_admin FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("User not registered.".to_string()))
    }

    /// Get user by email (primary authentication lookup)
    pub async fn get_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password, phone_number, is_admin
            FROM users
            WHERE LOWER(email) = LOWER($1)
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Check if an email is already registered
    pub async fn email_exists(&self, email: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        let exists: bool = if let Some(id) = exclude_id {
            sqlx::query_scalar(
                "SELECT EXISTS(SELECT 1 FROM users WHERE LOWER(email) = LOWER($1) AND id != $2)",
            )
            .bind(email)
            .bind(id)
            .fetch_one(&self.pool)
            .await?
        } else {
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE LOWER(email) = LOWER($1))")
                .bind(email)
                .fetch_one(&self.pool)
                .await?
        };
        Ok(exists)
    }

    /// List users in insertion order
    pub async fn list(&self, query: &UserQuery) -> AppResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password, phone_number, is_admin
            FROM users
            ORDER BY id
            OFFSET $1 LIMIT $2
            "#,
        )
        .bind(query.skip.unwrap_or(0))
        .bind(query.limit.unwrap_or(100))
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    /// Create a new user with an already-hashed password
    pub async fn create(&self, user: &UserInput, password_hash: &str) -> AppResult<User> {
        let created = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password, phone_number, is_admin)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, email, password, phone_number, is_admin
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(password_hash)
        .bind(&user.phone_number)
        .bind(user.is_admin)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Replace every mutable field of an existing user.
    ///
    /// `is_admin` arrives already filtered through the escalation guard.
    pub async fn update(
        &self,
        id: i32,
        user: &UserInput,
        password_hash: &str,
        is_admin: bool,
    ) -> AppResult<User> {
        let updated = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET name = $1, email = $2, password = $3, phone_number = $4, is_admin = $5
            WHERE id = $6
            RETURNING id, name, email, password, phone_number, is_admin
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(password_hash)
        .bind(&user.phone_number)
        .bind(is_admin)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("User not registered.".to_string()))?;

        Ok(updated)
    }

    /// Delete a user
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("User not registered.".to_string()));
        }

        Ok(())
    }
}
