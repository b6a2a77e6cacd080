//! Currency codes (lowercase, e.g. "btc")
//!
//! Bitso adds and removes tickers between API releases, so the set of valid
//! codes is server-side data rather than a closed enum. Any well-formed
//! lowercase alphanumeric code is accepted; malformed input is a decode
//! error, never a panic.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// A currency code as used by Bitso ("btc", "mxn", ...)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Currency(String);

impl Currency {
    /// Bitcoin
    pub const BTC: &'static str = "btc";
    /// Ether
    pub const ETH: &'static str = "eth";
    /// Ripple
    pub const XRP: &'static str = "xrp";
    /// Litecoin
    pub const LTC: &'static str = "ltc";
    /// Bitcoin Cash
    pub const BCH: &'static str = "bch";
    /// Mexican peso
    pub const MXN: &'static str = "mxn";
    /// US dollar
    pub const USD: &'static str = "usd";
    /// Argentine peso
    pub const ARS: &'static str = "ars";
    /// Brazilian real
    pub const BRL: &'static str = "brl";

    /// Get the code as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Currency {
    type Err = CurrencyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_lowercase();
        if code.is_empty() {
            return Err(CurrencyParseError::Empty);
        }
        if !code.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit()) {
            return Err(CurrencyParseError::InvalidCode(s.to_string()));
        }
        Ok(Self(code))
    }
}

impl<'de> Deserialize<'de> for Currency {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Currency {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Error parsing a currency code
#[derive(Debug, Clone, thiserror::Error)]
pub enum CurrencyParseError {
    #[error("Currency code is empty")]
    Empty,

    #[error("Invalid currency code: {0:?}")]
    InvalidCode(String),
}
