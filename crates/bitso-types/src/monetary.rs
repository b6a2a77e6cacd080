//! Monetary amounts as decimal strings
//!
//! Bitso transmits monetary values as decimal strings. They are kept as
//! strings end to end; conversion to `Decimal` or `f64` is explicit and
//! meant for display or computation, never for storage.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A monetary value in its wire form
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Monetary(String);

impl Monetary {
    /// Create a new monetary value from its string form
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the raw string form
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to an exact decimal
    pub fn to_decimal(&self) -> Result<Decimal, rust_decimal::Error> {
        Decimal::from_str(&self.0)
    }

    /// Lossy conversion for display purposes; returns 0.0 on malformed input
    pub fn to_f64(&self) -> f64 {
        self.0.parse().unwrap_or_default()
    }
}

impl fmt::Display for Monetary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Decimal> for Monetary {
    fn from(d: Decimal) -> Self {
        Self(d.to_string())
    }
}

impl From<&str> for Monetary {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Monetary {
    fn from(s: String) -> Self {
        Self(s)
    }
}
