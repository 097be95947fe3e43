//! Order error types.

use thiserror::Error;

use orchard_core::ProductId;

use crate::db::RepositoryError;

/// Errors that can occur during order operations.
#[derive(Debug, Error)]
pub enum OrderError {
    /// The user's cart has no lines to order.
    #[error("cart is empty")]
    EmptyCart,

    /// No coupon matches the supplied code.
    #[error("no coupon with that code")]
    InvalidCoupon,

    /// A line could not be covered by remaining stock.
    #[error("not enough stock for product {product_id}")]
    InsufficientStock {
        /// The product that came up short.
        product_id: ProductId,
    },

    /// No order with the requested ID.
    #[error("order not found")]
    NotFound,

    /// Only pending orders can be removed.
    #[error("order cannot be removed")]
    NotRemovable,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}
