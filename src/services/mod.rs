//! Business logic services

pub mod catalog;
pub mod customers;
pub mod rentals;
pub mod users;

use crate::{config::AuthConfig, error::AppResult, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub users: users::UsersService,
    pub catalog: catalog::CatalogService,
    pub customers: customers::CustomersService,
    pub rentals: rentals::RentalsService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, auth_config: AuthConfig) -> AppResult<Self> {
        Ok(Self {
            users: users::UsersService::new(repository.clone(), auth_config)?,
            catalog: catalog::CatalogService::new(repository.clone()),
            customers: customers::CustomersService::new(repository.clone()),
            rentals: rentals::RentalsService::new(repository.clone()),
            repository,
        })
    }

    /// Lightweight database connectivity check for readiness probes
    pub async fn ping_database(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.repository.pool).await?;
        Ok(())
    }
}
