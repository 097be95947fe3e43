//! Business services for the Orchard API.
//!
//! Each service borrows the shared pool, wraps the repositories it needs, and
//! surfaces a typed error the request boundary maps onto an HTTP response.

pub mod auth;
pub mod cart;
pub mod orders;

pub use auth::{AuthError, AuthService};
pub use cart::{CartError, CartService};
pub use orders::{OrderError, OrderService};
