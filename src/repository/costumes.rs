//! Costumes repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::costume::{Costume, CostumeInput, CostumeQuery},
};

#[derive(Clone)]
pub struct CostumesRepository {
    pool: Pool<Postgres>,
}

impl CostumesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get costume by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Costume> {
        sqlx::query_as::<_, Costume>(
            "SELECT id, name, description, fee, availability FROM costumes WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Costume not registered.".to_string()))
    }

    /// List costumes, optionally filtered by availability, in insertion order
    pub async fn list(&self, query: &CostumeQuery) -> AppResult<Vec<Costume>> {
        let skip = query.skip.unwrap_or(0);
        let limit = query.limit.unwrap_or(100);

        let costumes = if let Some(availability) = query.availability {
            sqlx::query_as::<_, Costume>(
                r#"
                SELECT id, name, description, fee, availability
                FROM costumes
                WHERE availability = $1
                ORDER BY id
                OFFSET $2 LIMIT $3
                "#,
            )
            .bind(availability)
            .bind(skip)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?
        } else {
            sqlx::query_as::<_, Costume>(
                r#"
                SELECT id, name, description, fee, availability
                FROM costumes
                ORDER BY id
                OFFSET $1 LIMIT $2
                "#,
            )
            .bind(skip)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?
        };

        Ok(costumes)
    }

    /// Check if a costume name is already taken
    pub async fn name_exists(&self, name: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        let exists: bool = if let Some(id) = exclude_id {
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM costumes WHERE name = $1 AND id != $2)")
                .bind(name)
                .bind(id)
                .fetch_one(&self.pool)
                .await?
        } else {
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM costumes WHERE name = $1)")
                .bind(name)
                .fetch_one(&self.pool)
                .await?
        };
        Ok(exists)
    }

    /// Create a new costume
    pub async fn create(&self, costume: &CostumeInput) -> AppResult<Costume> {
        let created = sqlx::query_as::<_, Costume>(
            r#"
            INSERT INTO costumes (name, description, fee, availability)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, description, fee, availability
            "#,
        )
        .bind(&costume.name)
        .bind(&costume.description)
        .bind(costume.fee)
        .bind(costume.availability)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Replace every mutable field of an existing costume
    pub async fn update(&self, id: i32, costume: &CostumeInput) -> AppResult<Costume> {
        let updated = sqlx::query_as::<_, Costume>(
            r#"
            UPDATE costumes
            SET name = $1, description = $2, fee = $3, availability = $4
            WHERE id = $5
            RETURNING id, name, description, fee, availability
            "#,
        )
        .bind(&costume.name)
        .bind(&costume.description)
        .bind(costume.fee)
        .bind(costume.availability)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Costume not registered.".to_string()))?;

        Ok(updated)
    }

    /// Delete a costume
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM costumes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Costume not registered.".to_string()));
        }

        Ok(())
    }
}
