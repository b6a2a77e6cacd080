//! Transaction IDs
//!
//! Bitso sometimes sends `tid` as a JSON integer and sometimes as a numeric
//! string; both decode to the same unsigned value.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A trade/transaction ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Tid(pub u64);

impl Tid {
    /// The numeric value
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for Tid {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

impl fmt::Display for Tid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Tid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.0)
    }
}

impl<'de> Deserialize<'de> for Tid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TidVisitor;

        impl serde::de::Visitor<'_> for TidVisitor {
            type Value = Tid;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an unsigned integer or a numeric string")
            }

            fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<Tid, E> {
                Ok(Tid(v))
            }

            fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<Tid, E> {
                u64::try_from(v)
                    .map(Tid)
                    .map_err(|_| E::custom(format!("negative transaction id: {}", v)))
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Tid, E> {
                v.parse()
                    .map(Tid)
                    .map_err(|_| E::custom(format!("invalid transaction id: {:?}", v)))
            }
        }

        deserializer.deserialize_any(TidVisitor)
    }
}
