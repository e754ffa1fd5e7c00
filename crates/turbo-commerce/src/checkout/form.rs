//! Checkout form and its validation rules.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::email::Email;

/// How the customer intends to pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Card payment.
    #[default]
    Card,
    /// PayPal.
    PayPal,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "card",
            PaymentMethod::PayPal => "paypal",
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "card" => Ok(PaymentMethod::Card),
            "paypal" => Ok(PaymentMethod::PayPal),
            _ => Err(()),
        }
    }
}

/// Fields of the checkout form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckoutField {
    Name,
    Email,
    Address,
    City,
    Zip,
    Method,
}

impl CheckoutField {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutField::Name => "name",
            CheckoutField::Email => "email",
            CheckoutField::Address => "address",
            CheckoutField::City => "city",
            CheckoutField::Zip => "zip",
            CheckoutField::Method => "method",
        }
    }
}

/// Per-field validation messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CheckoutErrors(BTreeMap<CheckoutField, String>);

impl CheckoutErrors {
    fn insert(&mut self, field: CheckoutField, message: &str) {
        self.0.insert(field, message.to_string());
    }

    /// The message for a field, if it failed validation.
    pub fn get(&self, field: CheckoutField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Failed fields in form order.
    pub fn fields(&self) -> impl Iterator<Item = CheckoutField> + '_ {
        self.0.keys().copied()
    }
}

impl fmt::Display for CheckoutErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|(field, msg)| format!("{}: {}", field.as_str(), msg))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

/// Contact, shipping and payment details collected at checkout.
///
/// `method` is kept as the raw submitted value so that an unknown choice
/// surfaces as a field error rather than a parse failure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckoutForm {
    pub name: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub zip: String,
    pub method: String,
}

impl Default for CheckoutForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            address: String::new(),
            city: String::new(),
            zip: String::new(),
            method: PaymentMethod::default().as_str().to_string(),
        }
    }
}

impl CheckoutForm {
    /// A blank form with name and email carried over from the signed-in user.
    pub fn prefilled(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            ..Self::default()
        }
    }

    /// The selected payment method, if it is one we accept.
    pub fn payment_method(&self) -> Option<PaymentMethod> {
        self.method.parse().ok()
    }

    /// Check every field, collecting all failures.
    pub fn validate(&self) -> Result<PaymentMethod, CheckoutErrors> {
        let mut errors = CheckoutErrors::default();

        if self.name.trim().is_empty() {
            errors.insert(CheckoutField::Name, "Name is required");
        }
        if !Email::is_valid(&self.email) {
            errors.insert(CheckoutField::Email, "Enter a valid email");
        }
        if self.address.trim().is_empty() {
            errors.insert(CheckoutField::Address, "Address is required");
        }
        if self.city.trim().is_empty() {
            errors.insert(CheckoutField::City, "City is required");
        }
        if !is_valid_zip(&self.zip) {
            errors.insert(CheckoutField::Zip, "Enter a valid ZIP/Postal code");
        }
        let method = self.payment_method();
        if method.is_none() {
            errors.insert(CheckoutField::Method, "Select a payment method");
        }

        match method {
            Some(method) if errors.is_empty() => Ok(method),
            _ => Err(errors),
        }
    }
}

/// 4 to 10 ASCII digits.
fn is_valid_zip(zip: &str) -> bool {
    (4..=10).contains(&zip.len()) && zip.bytes().all(|b| b.is_ascii_digit())
}
