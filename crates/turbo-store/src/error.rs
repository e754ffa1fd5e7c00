//! Store error types.

use thiserror::Error;
use turbo_auth::AuthError;
use turbo_cache::CacheError;
use turbo_commerce::CommerceError;

/// Errors surfaced by [`Storefront`](crate::Storefront) operations.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Commerce(#[from] CommerceError),

    #[error(transparent)]
    Storage(#[from] CacheError),
}

impl StoreError {
    /// Message suitable for showing to the shopper.
    pub fn user_message(&self) -> String {
        match self {
            StoreError::Auth(e) => e.user_message().to_string(),
            StoreError::Commerce(CommerceError::EmptyCart) => "Your cart is empty.".to_string(),
            StoreError::Commerce(e) => e.to_string(),
            StoreError::Storage(_) => "Something went wrong saving your data.".to_string(),
        }
    }
}
