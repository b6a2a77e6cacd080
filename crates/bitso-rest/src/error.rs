//! Error types for REST API operations

use bitso_types::ErrorCode;

/// Errors that can occur during REST API operations
///
/// Transport failures, envelope decode failures, and API rejections are
/// distinct variants; exactly one is surfaced per call. Nothing is retried
/// internally — Bitso's nonce-based replay protection makes blind retries
/// hazardous, so retry orchestration belongs to the caller.
#[derive(Debug, thiserror::Error)]
pub enum RestError {
    /// HTTP request failed (connection refused, timeout, malformed response)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body did not match the envelope or the destination shape
    #[error("Decode error: {0}")]
    Decode(String),

    /// The exchange rejected the request
    #[error("API error {code}: {message}")]
    Api {
        /// Numeric error code (tolerant of string encoding on the wire)
        code: ErrorCode,
        /// Human-readable message from the API
        message: String,
    },

    /// Missing API credentials for a private endpoint
    #[error("Authentication required for this endpoint")]
    AuthRequired,

    /// The configured base URL or endpoint path is not a valid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// An order lookup returned no results
    #[error("No such order: {oid}")]
    OrderNotFound {
        /// The order ID that was looked up
        oid: String,
    },

    /// Environment variable not set
    #[error("Environment variable not set: {0}")]
    EnvVarNotSet(String),
}

impl RestError {
    /// Create a decode error from a serde failure
    pub(crate) fn decode(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }

    /// The API error code, if this is an API rejection
    pub fn api_code(&self) -> Option<u32> {
        match self {
            Self::Api { code, .. } => Some(code.value()),
            _ => None,
        }
    }

    /// True when the exchange explicitly rejected the request
    pub fn is_api_error(&self) -> bool {
        matches!(self, Self::Api { .. })
    }
}

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;
