//! Line-item quantity.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A cart line quantity, always within `MIN..=MAX`.
///
/// Out-of-range requests are clamped rather than rejected; there is no
/// error path for quantities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Quantity(u32);

impl Quantity {
    /// Smallest quantity a line can hold.
    pub const MIN: Quantity = Quantity(1);
    /// Largest quantity a line can hold.
    pub const MAX: Quantity = Quantity(99);

    /// Clamp any integer into the allowed range.
    pub fn clamped(n: i64) -> Self {
        Self(n.clamp(Self::MIN.0 as i64, Self::MAX.0 as i64) as u32)
    }

    /// Parse free-text input leniently.
    ///
    /// Blank or non-numeric input becomes 1; fractional values are
    /// truncated before clamping.
    pub fn from_input(input: &str) -> Self {
        match input.trim().parse::<f64>() {
            Ok(n) if n.is_finite() && n.trunc() != 0.0 => Self::clamped(n.trunc() as i64),
            _ => Self::MIN,
        }
    }

    /// Add to this quantity, capping at `MAX`.
    pub fn saturating_add(self, n: i64) -> Self {
        Self::clamped((self.0 as i64).saturating_add(n))
    }

    /// Get the raw value.
    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::MIN
    }
}

impl From<Quantity> for i64 {
    fn from(q: Quantity) -> Self {
        q.0 as i64
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Persisted snapshots may have been edited by hand; clamp on the way in.
impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let n = i64::deserialize(deserializer)?;
        Ok(Self::clamped(n))
    }
}
