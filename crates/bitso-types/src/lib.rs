//! Shared types for the Bitso exchange API
//!
//! This crate provides the core type definitions used across the Bitso SDK.
//! It has minimal dependencies and can be used independently.
//!
//! # Key Types
//!
//! - [`Book`] - Currency pair identifiers (e.g., "btc_mxn")
//! - [`Currency`] - Validated currency codes
//! - [`Monetary`] - Decimal-string monetary amounts
//! - [`Timestamp`], [`Tid`] - Tolerant wire-format decoders
//! - [`Envelope`] - The outer success/error wrapper on every REST response
//! - [`StreamMessage`] - Parsed WebSocket frame variants

pub mod book;
pub mod currency;
pub mod enums;
pub mod envelope;
pub mod messages;
pub mod models;
pub mod monetary;
pub mod tid;
pub mod time;

// Re-export commonly used types
pub use book::*;
pub use currency::*;
pub use enums::*;
pub use envelope::*;
pub use messages::*;
pub use models::*;
pub use monetary::*;
pub use tid::*;
pub use time::*;

// Re-export rust_decimal for users
pub use rust_decimal::Decimal;
