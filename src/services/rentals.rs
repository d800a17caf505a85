//! Rental workflow service

use crate::{
    error::AppResult,
    models::rental::{CreateRental, RentalDetails, RentalPatch, RentalQuery},
    repository::Repository,
};

#[derive(Clone)]
pub struct RentalsService {
    repository: Repository,
}

impl RentalsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List rentals with denormalized related entities
    pub async fn list_rentals(&self, query: &RentalQuery) -> AppResult<Vec<RentalDetails>> {
        self.repository.rentals.list(query).await
    }

    /// Get a rental by ID
    pub async fn get_rental(&self, id: i32) -> AppResult<RentalDetails> {
        self.repository.rentals.get_details_by_id(id).await
    }

    /// Rent a costume to a customer on behalf of the acting user
    pub async fn create_rental(&self, user_id: i32, rental: CreateRental) -> AppResult<RentalDetails> {
        self.repository.rentals.create(user_id, &rental).await
    }

    /// Partially update a rental's dates
    pub async fn patch_rental(&self, id: i32, patch: RentalPatch) -> AppResult<RentalDetails> {
        self.repository.rentals.patch(id, &patch).await
    }

    /// Delete a rental, restoring the costume's availability
    pub async fn delete_rental(&self, id: i32) -> AppResult<()> {
        self.repository.rentals.delete(id).await
    }
}
