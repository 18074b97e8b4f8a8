//! API handlers for the loan workflow REST endpoints

pub mod health;
pub mod loans;
pub mod openapi;
pub mod stats;
