//! Cart error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// No product with the requested ID.
    #[error("product not found")]
    ProductNotFound,

    /// The product's current stock is below the requested quantity.
    #[error("not enough stock")]
    InsufficientStock,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}
