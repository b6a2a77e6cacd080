//! Streaming client for the Bitso WebSocket API
//!
//! One [`BitsoStream`] owns one connection. A single background reader
//! demultiplexes inbound frames by their `type` discriminator into
//! [`bitso_types::StreamMessage`] variants and pushes them onto a bounded
//! inbox; keep-alives are discarded. The dispatcher never reconnects on its
//! own — a faulted connection is reported once and the caller decides.
//!
//! # Example
//!
//! ```no_run
//! use bitso_types::{Channel, StreamMessage};
//! use bitso_ws::BitsoStream;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let stream = BitsoStream::new();
//!     stream.connect().await?;
//!     stream.subscribe(&"btc_mxn".parse()?, Channel::Trades).await?;
//!
//!     let mut inbox = stream.take_receiver().expect("first take");
//!     while let Some(message) = inbox.recv().await {
//!         if let StreamMessage::Trades(update) = message {
//!             println!("{} trades on {}", update.payload.len(), update.book);
//!         }
//!     }
//!     Ok(())
//! }
//! ```

pub mod connection;
pub mod error;

pub use connection::{BitsoStream, StreamConfig, StreamState};
pub use error::{WsError, WsResult};

// Re-export the shared types crate
pub use bitso_types as types;
