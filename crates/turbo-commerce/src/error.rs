//! Commerce error types.

use thiserror::Error;

use crate::checkout::CheckoutErrors;

/// Errors that can occur in storefront commerce operations.
///
/// Cart operations are total and never produce one of these.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Checkout attempted with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Checkout form failed validation.
    #[error("Invalid checkout: {0}")]
    InvalidCheckout(CheckoutErrors),

    /// The product source could not be reached.
    #[error("Catalog unavailable: {0}")]
    CatalogUnavailable(String),
}

impl From<CheckoutErrors> for CommerceError {
    fn from(e: CheckoutErrors) -> Self {
        CommerceError::InvalidCheckout(e)
    }
}
