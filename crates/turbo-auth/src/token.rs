//! Opaque session tokens.
//!
//! The mock login issues a token that is nothing more than the base64 of
//! its claims. It carries no signature and proves nothing; it exists so the
//! presentation layer has something shaped like a bearer token to hold.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::user::Role;
use crate::AuthError;

/// Claims encoded into a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (the email address).
    pub sub: String,
    /// Role at issue time.
    pub role: Role,
    /// Issue time, Unix seconds.
    pub iat: i64,
}

/// An opaque session token with no cryptographic guarantee.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    /// Issue a token for the given claims.
    ///
    /// Deterministic: the same claims always yield the same token.
    pub fn issue(claims: &TokenClaims) -> Result<Self, AuthError> {
        let json = serde_json::to_vec(claims)?;
        Ok(Self(URL_SAFE_NO_PAD.encode(json)))
    }

    /// Decode the claims back out of the token.
    pub fn claims(&self) -> Result<TokenClaims, AuthError> {
        let bytes = URL_SAFE_NO_PAD
            .decode(&self.0)
            .map_err(|e| AuthError::Serialization(e.to_string()))?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Get the token as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
