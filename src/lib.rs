//! Fantasia Costume Rental Management System
//!
//! A Rust REST API server for managing a costume rental shop: the costume
//! catalog, the customer registry and the rental records tying them to the
//! employees handling them.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
