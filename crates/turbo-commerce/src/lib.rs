//! Storefront domain types and logic for TurboCommerce.
//!
//! This crate provides the pieces a client-side storefront is built from:
//!
//! - **Catalog**: Products and the provider that serves them
//! - **Cart**: Ordered line items with clamped quantities and a derived subtotal
//! - **Checkout**: Form validation and simulated order placement
//! - **Clock**: Injected time and delay capabilities for simulated latency
//!
//! # Example
//!
//! ```rust
//! use turbo_commerce::prelude::*;
//!
//! let cake = Product::new(
//!     "choco-delight",
//!     "Chocolate Delight",
//!     "Rich dark chocolate cake.",
//!     Money::usd(2999),
//!     "choco.jpg",
//! );
//!
//! let mut cart = Cart::new();
//! cart.add(&cake, 2);
//! assert_eq!(cart.subtotal().display(), "$59.98");
//! ```

pub mod clock;
pub mod email;
pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;

pub use email::Email;
pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::clock::{Clock, Delay, FixedClock, NoDelay, SystemClock, TokioDelay};
    pub use crate::email::Email;
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{CatalogProvider, Product, ProductSource, StaticCatalog};

    // Cart
    pub use crate::cart::{Cart, CartLine, Quantity};

    // Checkout
    pub use crate::checkout::{
        CheckoutErrors, CheckoutField, CheckoutForm, CheckoutService, OrderConfirmation,
        PaymentMethod,
    };
}
