//! Cart and line item types.

use crate::cart::Quantity;
use crate::catalog::Product;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// A shopping cart: line items in insertion order, at most one per product.
///
/// Every operation is total. Unknown ids are no-ops, quantities are
/// clamped and products in a second currency are refused, so nothing here
/// returns an error.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(from = "Vec<CartLine>", into = "Vec<CartLine>")]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a cart from persisted lines.
    ///
    /// Later duplicates of a product id are folded into the first line.
    /// Lines priced in a different currency from the first are dropped.
    pub fn from_lines(lines: impl IntoIterator<Item = CartLine>) -> Self {
        let mut cart = Self::new();
        for line in lines {
            if !cart.accepts(line.price.currency) {
                continue;
            }
            match cart.line_mut(&line.id) {
                Some(existing) => existing.qty = existing.qty.saturating_add(line.qty.into()),
                None => cart.lines.push(line),
            }
        }
        cart
    }

    /// Add a product to the cart.
    ///
    /// An existing line grows by `qty`, capped at [`Quantity::MAX`]. A new
    /// line snapshots the product and is appended at the end.
    ///
    /// Returns `false`, leaving the cart untouched, when the product is
    /// priced in a different currency from the lines already in the cart.
    pub fn add(&mut self, product: &Product, qty: i64) -> bool {
        if !self.accepts(product.price.currency) {
            return false;
        }
        if let Some(existing) = self.line_mut(&product.id) {
            existing.qty = existing.qty.saturating_add(qty);
            return true;
        }
        self.lines.push(CartLine::snapshot(product, Quantity::clamped(qty)));
        true
    }

    /// Remove the line for a product. Returns whether a line was removed.
    pub fn remove(&mut self, id: &ProductId) -> bool {
        let len_before = self.lines.len();
        self.lines.retain(|l| &l.id != id);
        self.lines.len() < len_before
    }

    /// Set a line's quantity. A missing quantity means 1.
    ///
    /// Returns whether a line was found.
    pub fn update_qty(&mut self, id: &ProductId, qty: Option<i64>) -> bool {
        let qty = Quantity::clamped(qty.unwrap_or(1));
        match self.line_mut(id) {
            Some(line) => {
                line.qty = qty;
                true
            }
            None => false,
        }
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Currency of the cart's lines; the default currency when empty.
    pub fn currency(&self) -> Currency {
        self.lines
            .first()
            .map_or(Currency::default(), |l| l.price.currency)
    }

    /// Sum of price × quantity over all lines, computed on every call.
    ///
    /// Saturates instead of overflowing.
    pub fn subtotal(&self) -> Money {
        let currency = self.currency();
        self.lines.iter().fold(Money::zero(currency), |acc, line| {
            acc.try_add(&line.total())
                .unwrap_or(Money::new(i64::MAX, currency))
        })
    }

    /// Total item count (sum of quantities).
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.qty.get()).sum()
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Get the line for a product.
    pub fn get(&self, id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| &l.id == id)
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    fn accepts(&self, currency: Currency) -> bool {
        self.lines.is_empty() || self.currency() == currency
    }

    fn line_mut(&mut self, id: &ProductId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|l| &l.id == id)
    }
}

impl From<Vec<CartLine>> for Cart {
    fn from(lines: Vec<CartLine>) -> Self {
        Self::from_lines(lines)
    }
}

impl From<Cart> for Vec<CartLine> {
    fn from(cart: Cart) -> Self {
        cart.lines
    }
}

/// A line item: a product snapshot taken at add time plus a quantity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    /// Product ID.
    pub id: ProductId,
    /// Product name (denormalized for display).
    pub name: String,
    /// Unit price at add time.
    pub price: Money,
    /// Product image at add time.
    pub image: String,
    /// Quantity.
    pub qty: Quantity,
}

impl CartLine {
    /// Snapshot a product into a new line.
    pub fn snapshot(product: &Product, qty: Quantity) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            image: product.image.clone(),
            qty,
        }
    }

    /// Line total (unit price × quantity).
    pub fn total(&self) -> Money {
        self.price.multiply(self.qty.into())
    }
}
