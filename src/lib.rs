//! Pustaka loan workflow service
//!
//! A Rust implementation of the library loan workflow: loan requests,
//! admin approval, returns and overdue tracking, coordinated with the
//! member registry and book inventory services over HTTP.

use std::sync::Arc;

use sqlx::{Pool, Postgres};

pub mod api;
pub mod config;
pub mod error;
pub mod gateway;
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
    pub pool: Pool<Postgres>,
}
