//! Exchange books (currency pairs, "btc_mxn" format)

use crate::currency::Currency;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// An ordered currency pair identifying a tradeable market
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Book {
    major: Currency,
    minor: Currency,
}

impl Book {
    /// Create a new book from major and minor currencies
    pub fn new(major: Currency, minor: Currency) -> Self {
        Self { major, minor }
    }

    /// The major (base) currency
    pub fn major(&self) -> &Currency {
        &self.major
    }

    /// The minor (quote) currency
    pub fn minor(&self) -> &Currency {
        &self.minor
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.major, self.minor)
    }
}

impl FromStr for Book {
    type Err = BookParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !s.contains('_') {
            return Err(BookParseError::MissingSeparator(s.to_string()));
        }

        let parts: Vec<&str> = s.split('_').collect();
        if parts.len() != 2 {
            return Err(BookParseError::InvalidFormat(s.to_string()));
        }

        let major = parts[0]
            .parse()
            .map_err(|_| BookParseError::EmptyPart(s.to_string()))?;
        let minor = parts[1]
            .parse()
            .map_err(|_| BookParseError::EmptyPart(s.to_string()))?;

        Ok(Self { major, minor })
    }
}

impl Serialize for Book {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Book {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Error parsing a book string
#[derive(Debug, Clone, thiserror::Error)]
pub enum BookParseError {
    #[error("Book must contain '_': {0:?}")]
    MissingSeparator(String),

    #[error("Invalid book format: {0:?}")]
    InvalidFormat(String),

    #[error("Book has an empty or invalid currency part: {0:?}")]
    EmptyPart(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn btc_mxn() -> Book {
        Book::new("btc".parse().unwrap(), "mxn".parse().unwrap())
    }

    #[test]
    fn test_book_parse() {
        let book: Book = "btc_mxn".parse().unwrap();
        assert_eq!(book.major().as_str(), "btc");
        assert_eq!(book.minor().as_str(), "mxn");
        assert_eq!(book, btc_mxn());
    }

    #[test]
    fn test_book_roundtrip() {
        for s in ["btc_mxn", "eth_btc", "xrp_usd", "mana_mxn"] {
            let book: Book = s.parse().unwrap();
            assert_eq!(book.to_string(), s);
        }
    }

    #[test]
    fn test_book_parse_error() {
        assert!("btcmxn".parse::<Book>().is_err());
        assert!("btc_mxn_usd".parse::<Book>().is_err());
        assert!("_mxn".parse::<Book>().is_err());
        assert!("btc_".parse::<Book>().is_err());
        assert!("".parse::<Book>().is_err());
    }

    #[test]
    fn test_book_serde() {
        let json = serde_json::to_string(&btc_mxn()).unwrap();
        assert_eq!(json, "\"btc_mxn\"");

        let parsed: Book = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, btc_mxn());

        assert!(serde_json::from_str::<Book>("\"btcmxn\"").is_err());
    }
}
