//! REST client for the Bitso exchange API
//!
//! Public market data works without credentials; account and trading
//! endpoints require an API key and secret. Requests are signed with
//! HMAC-SHA256 and a strictly increasing nonce; every response is unwrapped
//! from Bitso's `{success, payload, error}` envelope.
//!
//! # Example
//!
//! ```no_run
//! use bitso_rest::{BitsoClient, Credentials};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Public endpoints only
//!     let client = BitsoClient::new();
//!     let ticker = client.ticker(&"btc_mxn".parse()?).await?;
//!     println!("last: {}", ticker.last);
//!
//!     // With authentication for private endpoints
//!     let creds = Credentials::from_env()?;
//!     let client = BitsoClient::with_credentials(creds);
//!     let balances = client.balances().await?;
//!     println!("{} currencies", balances.len());
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod credentials;
pub mod endpoints;
pub mod error;
pub mod rate_limit;

pub use client::{BitsoClient, ClientConfig};
pub use credentials::Credentials;
pub use error::{RestError, RestResult};
pub use rate_limit::TicketLimiter;

// Re-export the shared types crate
pub use bitso_types as types;
