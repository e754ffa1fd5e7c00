//! Shopping cart module.
//!
//! Contains the cart, its line items and the clamped quantity type.

mod cart;
mod quantity;

pub use cart::{Cart, CartLine};
pub use quantity::Quantity;
