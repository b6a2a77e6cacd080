//! The outer success/error wrapper common to every REST response
//!
//! Every response parses into [`Envelope`] first; only when `success` is
//! true is the body decoded again into the endpoint-specific shape. The
//! envelope fields and `payload` are top-level siblings, so destination
//! shapes decode from the full body rather than from a nested key.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// The common response envelope
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    /// Whether the request was accepted
    #[serde(default)]
    pub success: bool,
    /// Error details when `success` is false
    #[serde(default)]
    pub error: Option<ApiErrorBody>,
}

/// Error details inside a failed envelope
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    /// Numeric error code; the API encodes it as a number or a string
    #[serde(default)]
    pub code: ErrorCode,
    /// Human-readable message
    #[serde(default)]
    pub message: String,
}

/// An API error code, tolerant of number and string wire encodings
///
/// Non-numeric string codes normalize to 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct ErrorCode(pub u32);

impl ErrorCode {
    /// The numeric value
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for ErrorCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CodeVisitor;

        impl serde::de::Visitor<'_> for CodeVisitor {
            type Value = ErrorCode;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an error code as a number or string")
            }

            fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<ErrorCode, E> {
                Ok(ErrorCode(u32::try_from(v).unwrap_or_default()))
            }

            fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<ErrorCode, E> {
                Ok(ErrorCode(u32::try_from(v).unwrap_or_default()))
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<ErrorCode, E> {
                Ok(ErrorCode(v.trim().parse().unwrap_or_default()))
            }
        }

        deserializer.deserialize_any(CodeVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope() {
        let env: Envelope = serde_json::from_str(r#"{"success": true, "payload": [1, 2]}"#).unwrap();
        assert!(env.success);
        assert!(env.error.is_none());
    }

    #[test]
    fn test_error_envelope_numeric_code() {
        let env: Envelope = serde_json::from_str(
            r#"{"success": false, "error": {"code": 101, "message": "Invalid API key"}}"#,
        )
        .unwrap();
        assert!(!env.success);
        let err = env.error.unwrap();
        assert_eq!(err.code.value(), 101);
        assert_eq!(err.message, "Invalid API key");
    }

    #[test]
    fn test_error_envelope_string_code() {
        let env: Envelope = serde_json::from_str(
            r#"{"success": false, "error": {"code": "101", "message": "Invalid API key"}}"#,
        )
        .unwrap();
        assert_eq!(env.error.unwrap().code.value(), 101);
    }

    #[test]
    fn test_non_numeric_code_normalizes_to_zero() {
        let code: ErrorCode = serde_json::from_str("\"oops\"").unwrap();
        assert_eq!(code.value(), 0);
    }

    #[test]
    fn test_out_of_range_code_normalizes_to_zero() {
        // Never truncated modulo 2^32; out of range collapses like the
        // other tolerant paths.
        let code: ErrorCode = serde_json::from_str("4294967297").unwrap();
        assert_eq!(code.value(), 0);
        let code: ErrorCode = serde_json::from_str("-7").unwrap();
        assert_eq!(code.value(), 0);
    }

    #[test]
    fn test_missing_fields_default() {
        let env: Envelope = serde_json::from_str("{}").unwrap();
        assert!(!env.success);
        assert!(env.error.is_none());
    }
}
