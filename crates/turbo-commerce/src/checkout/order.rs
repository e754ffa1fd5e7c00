//! Simulated order placement.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::cart::Cart;
use crate::checkout::{CheckoutForm, PaymentMethod};
use crate::clock::Delay;
use crate::error::CommerceError;
use crate::money::Money;

/// Default simulated payment latency.
pub const DEFAULT_CHECKOUT_LATENCY: Duration = Duration::from_millis(800);

/// What the customer sees after a successful order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderConfirmation {
    /// Amount charged.
    pub subtotal: Money,
    /// Number of items ordered.
    pub item_count: u32,
    /// Payment method used.
    pub method: PaymentMethod,
    /// Message for the customer.
    pub message: String,
}

/// Validates a checkout and stands in for the payment round trip.
///
/// No payment processor is contacted; a valid form against a non-empty
/// cart always succeeds after the simulated delay.
pub struct CheckoutService {
    delay: Arc<dyn Delay>,
    latency: Duration,
}

impl CheckoutService {
    pub fn new(delay: Arc<dyn Delay>) -> Self {
        Self {
            delay,
            latency: DEFAULT_CHECKOUT_LATENCY,
        }
    }

    /// Override the simulated latency.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Validate the form and cart, then wait out the simulated payment.
    ///
    /// The caller owns the cart and is responsible for clearing it.
    #[instrument(skip_all, fields(lines = cart.len()))]
    pub async fn submit(
        &self,
        form: &CheckoutForm,
        cart: &Cart,
    ) -> Result<OrderConfirmation, CommerceError> {
        let method = form.validate()?;
        if cart.is_empty() {
            return Err(CommerceError::EmptyCart);
        }

        self.delay.sleep(self.latency).await;

        let confirmation = OrderConfirmation {
            subtotal: cart.subtotal(),
            item_count: cart.item_count(),
            method,
            message: "Payment successful! Your order is confirmed.".to_string(),
        };
        info!(
            subtotal = %confirmation.subtotal,
            items = confirmation.item_count,
            method = method.as_str(),
            "order placed"
        );
        Ok(confirmation)
    }
}

impl std::fmt::Debug for CheckoutService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckoutService")
            .field("latency", &self.latency)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Product;
    use crate::checkout::CheckoutField;
    use crate::clock::NoDelay;

    fn form() -> CheckoutForm {
        CheckoutForm {
            name: "Jane".to_string(),
            email: "jane@example.com".to_string(),
            address: "1 Main St".to_string(),
            city: "Springfield".to_string(),
            zip: "49007".to_string(),
            method: "card".to_string(),
        }
    }

    fn cart() -> Cart {
        let mut cart = Cart::new();
        cart.add(&Product::new("a", "A", "", Money::usd(1500), "a.jpg"), 2);
        cart
    }

    #[tokio::test]
    async fn test_submit_confirms_order() {
        let service = CheckoutService::new(Arc::new(NoDelay));
        let confirmation = service.submit(&form(), &cart()).await.unwrap();

        assert_eq!(confirmation.subtotal, Money::usd(3000));
        assert_eq!(confirmation.item_count, 2);
        assert_eq!(confirmation.method, PaymentMethod::Card);
    }

    #[tokio::test]
    async fn test_submit_rejects_empty_cart() {
        let service = CheckoutService::new(Arc::new(NoDelay));
        let err = service.submit(&form(), &Cart::new()).await.unwrap_err();
        assert!(matches!(err, CommerceError::EmptyCart));
    }

    #[tokio::test]
    async fn test_submit_rejects_invalid_form() {
        let service = CheckoutService::new(Arc::new(NoDelay));
        let mut bad = form();
        bad.zip = "12".to_string();

        match service.submit(&bad, &cart()).await {
            Err(CommerceError::InvalidCheckout(errors)) => {
                assert!(errors.get(CheckoutField::Zip).is_some());
            }
            other => panic!("expected InvalidCheckout, got {other:?}"),
        }
    }
}
