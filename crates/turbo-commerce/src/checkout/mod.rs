//! Checkout module.
//!
//! Contains the checkout form, its validation and simulated order placement.

mod form;
mod order;

pub use form::{CheckoutErrors, CheckoutField, CheckoutForm, PaymentMethod};
pub use order::{CheckoutService, OrderConfirmation, DEFAULT_CHECKOUT_LATENCY};
