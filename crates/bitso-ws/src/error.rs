//! Error types for the streaming client

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur on the streaming connection
#[derive(Debug, Error)]
pub enum WsError {
    /// Failed to establish the WebSocket connection
    #[error("Failed to connect to {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    /// Connection attempt timed out
    #[error("Connection timeout after {timeout:?} to {url}")]
    ConnectionTimeout { url: String, timeout: Duration },

    /// Operation requires a connected stream
    #[error("Stream is not connected")]
    NotConnected,

    /// Connect was called while a connection is already active
    #[error("Stream is already connected")]
    AlreadyConnected,

    /// WebSocket protocol error
    #[error("WebSocket error: {0}")]
    WebSocket(String),

    /// Failed to encode an outbound control frame
    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Result type for streaming operations
pub type WsResult<T> = Result<T, WsError>;
