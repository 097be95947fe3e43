//! Cart service.
//!
//! The mutable per-user basket. Stock is consulted on add but only reserved
//! at order creation, so two carts can hold the same last unit; the checkout
//! transaction is what settles who gets it.

mod error;

pub use error::CartError;

use sqlx::PgPool;

use orchard_core::{ProductId, UserId};

use crate::db::carts::CartRepository;
use crate::db::catalog::CatalogRepository;
use crate::models::cart::CartLine;

/// Cart service.
pub struct CartService<'a> {
    catalog: CatalogRepository<'a>,
    carts: CartRepository<'a>,
}

impl<'a> CartService<'a> {
    /// Create a new cart service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            catalog: CatalogRepository::new(pool),
            carts: CartRepository::new(pool),
        }
    }

    /// Add `quantity` of a product to the user's cart.
    ///
    /// Repeated adds for the same product accumulate into one line.
    ///
    /// # Errors
    ///
    /// Returns `CartError::ProductNotFound` if the product doesn't exist.
    /// Returns `CartError::InsufficientStock` if current stock is below the
    /// requested quantity.
    pub async fn add(
        &self,
        user_id: UserId,
        product_id: ProductId,
        quantity: i32,
    ) -> Result<(), CartError> {
        let product = self
            .catalog
            .get(product_id)
            .await?
            .ok_or(CartError::ProductNotFound)?;

        if product.stock < quantity {
            return Err(CartError::InsufficientStock);
        }

        let cart_id = self.carts.find_or_create(user_id).await?;
        self.carts.add_item(cart_id, product_id, quantity).await?;

        Ok(())
    }

    /// Remove a product's line from the user's cart.
    ///
    /// Removing a product that isn't in the cart succeeds silently.
    ///
    /// # Errors
    ///
    /// Returns `CartError::ProductNotFound` if the product doesn't exist.
    pub async fn remove(&self, user_id: UserId, product_id: ProductId) -> Result<(), CartError> {
        self.catalog
            .get(product_id)
            .await?
            .ok_or(CartError::ProductNotFound)?;

        let cart_id = self.carts.find_or_create(user_id).await?;
        self.carts.remove_item(cart_id, product_id).await?;

        Ok(())
    }

    /// The user's cart lines, priced at read time.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Repository` if the database operation fails.
    pub async fn list(&self, user_id: UserId) -> Result<Vec<CartLine>, CartError> {
        let cart_id = self.carts.find_or_create(user_id).await?;
        Ok(self.carts.lines(cart_id).await?)
    }
}
