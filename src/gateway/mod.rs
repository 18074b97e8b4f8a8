//! Clients for the external collaborator services.
//!
//! The workflow engine only ever talks to the member registry and the book
//! inventory through these traits; the HTTP implementations live in the
//! submodules and every remote call is bounded by the configured timeout.
//! A timed-out or failed call is an error of the enclosing operation, never
//! an implicit success.

pub mod inventory;
pub mod members;

use async_trait::async_trait;

use crate::error::{AppError, AppResult};

pub use inventory::HttpInventoryGateway;
pub use members::HttpMemberGateway;

/// Outcome of a conditional stock decrement on the inventory service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockDecrement {
    /// Stock was decremented by one
    Applied,
    /// The inventory refused: no copies left
    Refused,
    /// The book does not exist
    NotFound,
}

/// Member registry contract: existence checks at loan creation
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MemberGateway: Send + Sync {
    async fn exists(&self, member_id: i32) -> AppResult<bool>;
}

/// Book inventory contract.
///
/// `decrement_stock` is the authoritative availability decision: the
/// inventory applies it conditionally (stock > 0), so two racing borrowers
/// of the last copy get exactly one `Applied` and one `Refused`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InventoryGateway: Send + Sync {
    /// Current stock count, or `None` when the book does not exist
    async fn stock(&self, book_id: i32) -> AppResult<Option<i64>>;

    async fn decrement_stock(&self, book_id: i32) -> AppResult<StockDecrement>;

    async fn increment_stock(&self, book_id: i32) -> AppResult<()>;
}

/// Map a reqwest transport failure onto the upstream error class
pub(crate) fn upstream_error(service: &str, err: reqwest::Error) -> AppError {
    if err.is_timeout() {
        AppError::Upstream(format!("{} request timed out", service))
    } else {
        AppError::Upstream(format!("{} unreachable: {}", service, err))
    }
}
