//! Customer registry service

use crate::{
    error::{AppError, AppResult},
    models::customer::{Customer, CustomerInput, CustomerQuery},
    repository::Repository,
};

#[derive(Clone)]
pub struct CustomersService {
    repository: Repository,
}

impl CustomersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List customers
    pub async fn list_customers(&self, query: &CustomerQuery) -> AppResult<Vec<Customer>> {
        self.repository.customers.list(query).await
    }

    /// Get customer by cpf
    pub async fn get_customer(&self, cpf: &str) -> AppResult<Customer> {
        self.repository.customers.get_by_cpf(cpf).await
    }

    /// Create a new customer; cpf is unique across the registry
    pub async fn create_customer(&self, customer: CustomerInput) -> AppResult<Customer> {
        if self.repository.customers.cpf_exists(&customer.cpf).await? {
            return Err(AppError::Conflict("Customer already registered.".to_string()));
        }

        self.repository.customers.create(&customer).await
    }

    /// Replace the customer addressed by cpf; moving onto a cpf that
    /// belongs to another customer is a conflict
    pub async fn update_customer(&self, cpf: &str, customer: CustomerInput) -> AppResult<Customer> {
        if customer.cpf != cpf && self.repository.customers.cpf_exists(&customer.cpf).await? {
            return Err(AppError::Conflict("Customer already registered.".to_string()));
        }

        self.repository.customers.update_by_cpf(cpf, &customer).await
    }

    /// Delete the customer addressed by cpf
    pub async fn delete_customer(&self, cpf: &str) -> AppResult<()> {
        self.repository.customers.delete_by_cpf(cpf).await
    }
}
