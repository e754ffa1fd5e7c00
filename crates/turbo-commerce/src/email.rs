//! Email address type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An email address with the `local@domain.tld` shape.
///
/// ## Constraints
///
/// - No whitespace anywhere
/// - Exactly one `@` symbol
/// - Non-empty local part
/// - Domain contains a `.` with non-empty text on both sides of it
///
/// ```
/// use turbo_commerce::Email;
///
/// assert!(Email::parse("admin@example.com").is_some());
/// assert!(Email::parse("no-at-symbol").is_none());
/// assert!(Email::parse("user@localhost").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Parse an email, returning `None` if it does not have the expected shape.
    pub fn parse(s: &str) -> Option<Self> {
        if s.chars().any(char::is_whitespace) {
            return None;
        }

        let (local, domain) = s.split_once('@')?;
        if local.is_empty() || domain.contains('@') {
            return None;
        }

        let has_inner_dot = domain
            .char_indices()
            .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len());
        if !has_inner_dot {
            return None;
        }

        Some(Self(s.to_string()))
    }

    /// Returns true if `s` has the `local@domain.tld` shape.
    pub fn is_valid(s: &str) -> bool {
        Self::parse(s).is_some()
    }

    /// The part before the `@`.
    pub fn local_part(&self) -> &str {
        self.0.split_once('@').map_or(self.0.as_str(), |(local, _)| local)
    }

    /// Get the address as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
