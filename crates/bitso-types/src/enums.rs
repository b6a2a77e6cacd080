//! Closed enums used across the API
//!
//! All of these decode fallibly: an unrecognized wire string is a serde
//! error, never a panic, since the input is server-controlled.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether an order is a buy or a sell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    /// The wire string form
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether an order is a market or a limit order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    Market,
    Limit,
}

/// Status of a user order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    #[serde(rename = "open")]
    Open,
    #[serde(rename = "queued")]
    Queued,
    #[serde(rename = "partially filled")]
    PartialFill,
}

/// Type of a ledger operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Funding,
    Withdrawal,
    Trade,
    Fee,
}

impl Operation {
    /// The ledger endpoint path segment for this operation
    pub fn endpoint_segment(&self) -> &'static str {
        match self {
            Self::Funding => "fundings",
            Self::Withdrawal => "withdrawals",
            Self::Trade => "trades",
            Self::Fee => "fees",
        }
    }
}

/// Streaming channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    /// Real-time trades
    #[serde(rename = "trades")]
    Trades,
    /// Order-book deltas
    #[serde(rename = "diff-orders")]
    DiffOrders,
    /// Full order-book snapshots
    #[serde(rename = "orders")]
    Orders,
    /// Keep-alive; never forwarded to consumers
    #[serde(rename = "ka")]
    KeepAlive,
}

impl Channel {
    /// The wire string form
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trades => "trades",
            Self::DiffOrders => "diff-orders",
            Self::Orders => "orders",
            Self::KeepAlive => "ka",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_roundtrip() {
        for (side, s) in [(OrderSide::Buy, "\"buy\""), (OrderSide::Sell, "\"sell\"")] {
            assert_eq!(serde_json::to_string(&side).unwrap(), s);
            assert_eq!(serde_json::from_str::<OrderSide>(s).unwrap(), side);
        }
    }

    #[test]
    fn test_unknown_side_is_error_not_panic() {
        assert!(serde_json::from_str::<OrderSide>("\"short\"").is_err());
    }

    #[test]
    fn test_status_partial_fill_wire_form() {
        let st: OrderStatus = serde_json::from_str("\"partially filled\"").unwrap();
        assert_eq!(st, OrderStatus::PartialFill);
        assert!(serde_json::from_str::<OrderStatus>("\"exploded\"").is_err());
    }

    #[test]
    fn test_order_type() {
        assert_eq!(
            serde_json::from_str::<OrderType>("\"limit\"").unwrap(),
            OrderType::Limit
        );
        assert!(serde_json::from_str::<OrderType>("\"stop\"").is_err());
    }

    #[test]
    fn test_operation_segments() {
        assert_eq!(Operation::Funding.endpoint_segment(), "fundings");
        assert_eq!(Operation::Fee.endpoint_segment(), "fees");
    }

    #[test]
    fn test_channel_wire_names() {
        assert_eq!(Channel::DiffOrders.as_str(), "diff-orders");
        assert_eq!(
            serde_json::from_str::<Channel>("\"ka\"").unwrap(),
            Channel::KeepAlive
        );
    }
}
