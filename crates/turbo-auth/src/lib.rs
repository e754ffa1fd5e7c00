//! Authentication module for TurboCommerce.
//!
//! Provides the storefront's mock login: credential policy, role
//! derivation and opaque session tokens. Nothing here talks to a real
//! identity provider.

mod error;
mod password;
mod session;
mod token;
mod user;

pub use error::AuthError;
pub use password::PasswordPolicy;
pub use session::{Session, SessionManager, DEFAULT_LOGIN_LATENCY};
pub use token::{SessionToken, TokenClaims};
pub use user::Role;
