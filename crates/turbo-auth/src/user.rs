//! User roles.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use turbo_commerce::Email;

/// User role for authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular customer.
    #[default]
    Customer,
    /// Store administrator.
    Admin,
}

impl Role {
    /// Get role as string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Admin => "admin",
        }
    }

    /// Derive the role from an email address.
    ///
    /// Admin iff the lowercased local part starts with `"admin"`. This is a
    /// placeholder rule kept for compatibility; a real deployment would take
    /// the role from an authenticated claim.
    pub fn for_email(email: &Email) -> Self {
        if email.local_part().to_lowercase().starts_with("admin") {
            Role::Admin
        } else {
            Role::Customer
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Role::Customer),
            "admin" => Ok(Role::Admin),
            _ => Err(()),
        }
    }
}
