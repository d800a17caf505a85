//! Costume catalog service

use crate::{
    error::{AppError, AppResult},
    models::costume::{Costume, CostumeInput, CostumeQuery},
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List costumes with optional availability filter
    pub async fn list_costumes(&self, query: &CostumeQuery) -> AppResult<Vec<Costume>> {
        self.repository.costumes.list(query).await
    }

    /// Get costume by ID
    pub async fn get_costume(&self, id: i32) -> AppResult<Costume> {
        self.repository.costumes.get_by_id(id).await
    }

    /// Create a new costume; names are unique across the catalog
    pub async fn create_costume(&self, costume: CostumeInput) -> AppResult<Costume> {
        if self
            .repository
            .costumes
            .name_exists(&costume.name, None)
            .await?
        {
            return Err(AppError::Conflict("Costume already registered.".to_string()));
        }

        self.repository.costumes.create(&costume).await
    }

    /// Replace a costume record
    pub async fn update_costume(&self, id: i32, costume: CostumeInput) -> AppResult<Costume> {
        if self
            .repository
            .costumes
            .name_exists(&costume.name, Some(id))
            .await?
        {
            return Err(AppError::Conflict("Costume already registered.".to_string()));
        }

        self.repository.costumes.update(id, &costume).await
    }

    /// Delete a costume
    pub async fn delete_costume(&self, id: i32) -> AppResult<()> {
        self.repository.costumes.delete(id).await
    }
}
