//! ISO-8601 timestamps as sent by Bitso
//!
//! The API emits at least two variants: with and without sub-second
//! precision, and with or without a colon in the UTC offset. All of them
//! must decode to the same absolute instant.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

// Tolerated wire formats; %.f matches an optional fractional part.
const TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
];

const DISPLAY_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

/// A point in time, parsed from Bitso's ISO-8601 variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<FixedOffset>);

impl Timestamp {
    /// The underlying datetime
    pub fn datetime(&self) -> DateTime<FixedOffset> {
        self.0
    }

    /// Seconds since the Unix epoch
    pub fn unix_timestamp(&self) -> i64 {
        self.0.timestamp()
    }
}

impl From<DateTime<FixedOffset>> for Timestamp {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        Self(dt)
    }
}

impl FromStr for Timestamp {
    type Err = TimestampParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        for format in TIME_FORMATS {
            if let Ok(dt) = DateTime::parse_from_str(s, format) {
                return Ok(Self(dt));
            }
        }
        Err(TimestampParseError(s.to_string()))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DISPLAY_FORMAT))
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Error parsing a timestamp string
#[derive(Debug, Clone, thiserror::Error)]
#[error("Unrecognized timestamp format: {0:?}")]
pub struct TimestampParseError(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_without_subseconds() {
        let t: Timestamp = "2024-01-15T10:30:00+00:00".parse().unwrap();
        assert_eq!(t.unix_timestamp(), 1705314600);
    }

    #[test]
    fn test_parse_with_subseconds_and_offset() {
        let t: Timestamp = "2024-01-15T10:30:00.123-06:00".parse().unwrap();
        // 10:30 at -06:00 is 16:30 UTC
        assert_eq!(t.unix_timestamp(), 1705314600 + 6 * 3600);
    }

    #[test]
    fn test_parse_compact_offset() {
        let t: Timestamp = "2024-01-15T10:30:00-0600".parse().unwrap();
        assert_eq!(t.unix_timestamp(), 1705314600 + 6 * 3600);
    }

    #[test]
    fn test_parse_variants_agree() {
        let a: Timestamp = "2024-01-15T10:30:00+00:00".parse().unwrap();
        let b: Timestamp = "2024-01-15T10:30:00.000+0000".parse().unwrap();
        assert_eq!(a.unix_timestamp(), b.unix_timestamp());
    }

    #[test]
    fn test_parse_error() {
        assert!("2024-01-15 10:30:00".parse::<Timestamp>().is_err());
        assert!("yesterday".parse::<Timestamp>().is_err());
    }

    #[test]
    fn test_serde() {
        let t: Timestamp = serde_json::from_str("\"2024-01-15T10:30:00+00:00\"").unwrap();
        assert_eq!(t.unix_timestamp(), 1705314600);

        let json = serde_json::to_string(&t).unwrap();
        let back: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
    }
}
