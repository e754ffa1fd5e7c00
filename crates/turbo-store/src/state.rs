//! Storefront state snapshot.

use serde::{Deserialize, Serialize};
use turbo_auth::Session;
use turbo_commerce::catalog::Product;
use turbo_commerce::cart::Cart;
use turbo_commerce::Money;

/// Drawer and modal visibility. Never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiState {
    pub cart_open: bool,
    pub auth_open: bool,
}

/// Everything an observer can see.
///
/// Replaced wholesale on every mutation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreState {
    pub products: Vec<Product>,
    pub user: Option<Session>,
    pub cart: Cart,
    pub ui: UiState,
}

impl StoreState {
    /// Cart subtotal, recomputed from the lines.
    pub fn subtotal(&self) -> Money {
        self.cart.subtotal()
    }

    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }
}
