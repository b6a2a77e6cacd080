//! REST payload models
//!
//! Shapes mirror the wire format. Fields the server adds in future releases
//! are ignored on decode; shapes here only grow.

use crate::{Book, Currency, Monetary, Operation, OrderSide, OrderStatus, OrderType, Tid, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Trading information from a specific book
#[derive(Debug, Clone, Deserialize)]
pub struct Ticker {
    /// Order book symbol
    pub book: Book,
    /// Last 24 hours volume
    pub volume: Monetary,
    /// Last 24 hours price high
    pub high: Monetary,
    /// Last traded price
    pub last: Monetary,
    /// Last 24 hours price low
    pub low: Monetary,
    /// Last 24 hours volume weighted average price
    pub vwap: Monetary,
    /// Lowest sell order
    pub ask: Monetary,
    /// Highest buy order
    pub bid: Monetary,
    /// Price change in the last 24 hours
    #[serde(default)]
    pub change_24: Option<Monetary>,
    /// Rolling average price change, keyed by hours (e.g. "6")
    #[serde(default)]
    pub rolling_average_change: HashMap<String, Monetary>,
    /// When this ticker was generated
    pub created_at: Timestamp,
}

/// A recent public trade
#[derive(Debug, Clone, Deserialize)]
pub struct Trade {
    pub book: Book,
    pub created_at: Timestamp,
    pub amount: Monetary,
    pub maker_side: OrderSide,
    pub price: Monetary,
    pub tid: Tid,
}

/// A trade made by the authenticated user
#[derive(Debug, Clone, Deserialize)]
pub struct UserTrade {
    pub book: Book,
    pub major: Monetary,
    pub created_at: Timestamp,
    pub minor: Monetary,
    pub fees_amount: Monetary,
    #[serde(rename = "currency")]
    pub fees_currency: Currency,
    pub price: Monetary,
    pub tid: Tid,
    pub oid: String,
    pub side: OrderSide,
}

/// A user trade attributed to a specific order
pub type UserOrderTrade = UserTrade;

/// An open order in the public order book
#[derive(Debug, Clone, Deserialize)]
pub struct PublicOrder {
    /// Order book symbol
    pub book: Book,
    /// Price per unit of major
    pub price: Monetary,
    /// Major amount in order
    pub amount: Monetary,
    /// Order ID (present only for unaggregated books)
    #[serde(default)]
    pub oid: Option<String>,
}

/// The public order book for one market
#[derive(Debug, Clone, Deserialize)]
pub struct OrderBook {
    pub asks: Vec<PublicOrder>,
    pub bids: Vec<PublicOrder>,
    pub updated_at: Timestamp,
    pub sequence: String,
}

/// An order belonging to the authenticated user
#[derive(Debug, Clone, Deserialize)]
pub struct UserOrder {
    pub book: Book,
    pub original_amount: Monetary,
    pub unfilled_amount: Monetary,
    pub original_value: Monetary,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub price: Monetary,
    pub oid: String,
    pub side: OrderSide,
    pub status: OrderStatus,
    #[serde(rename = "type")]
    pub order_type: OrderType,
}

/// An order placement request
#[derive(Debug, Clone, Serialize)]
pub struct OrderPlacement {
    pub book: Book,
    pub side: OrderSide,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    /// Major amount to trade (mutually exclusive with `minor`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub major: Option<Monetary>,
    /// Minor amount to trade
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minor: Option<Monetary>,
    /// Limit price; required for limit orders
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Monetary>,
}

impl OrderPlacement {
    /// A limit order for `major` at `price`
    pub fn limit(book: Book, side: OrderSide, major: Monetary, price: Monetary) -> Self {
        Self {
            book,
            side,
            order_type: OrderType::Limit,
            major: Some(major),
            minor: None,
            price: Some(price),
        }
    }

    /// A market order spending `major`
    pub fn market(book: Book, side: OrderSide, major: Monetary) -> Self {
        Self {
            book,
            side,
            order_type: OrderType::Market,
            major: Some(major),
            minor: None,
            price: None,
        }
    }
}

/// Balance of a single currency
#[derive(Debug, Clone, Deserialize)]
pub struct Balance {
    pub currency: Currency,
    pub total: Monetary,
    pub locked: Monetary,
    pub available: Monetary,
    #[serde(default)]
    pub pending_deposit: Option<Monetary>,
    #[serde(default)]
    pub pending_withdrawal: Option<Monetary>,
}

/// Trading fee for one book
#[derive(Debug, Clone, Deserialize)]
pub struct Fee {
    pub book: Book,
    pub fee_decimal: Monetary,
    pub fee_percent: Monetary,
}

/// Customer fee schedule: per-book trading fees plus withdrawal fees
#[derive(Debug, Clone, Deserialize)]
pub struct CustomerFees {
    pub fees: Vec<Fee>,
    /// Withdrawal fee per currency code
    #[serde(default)]
    pub withdrawal_fees: HashMap<String, Monetary>,
}

/// Default maker/taker rates for a book
#[derive(Debug, Clone, Deserialize)]
pub struct BookFlatRate {
    pub maker: Monetary,
    pub taker: Monetary,
}

/// A volume-based fee tier
#[derive(Debug, Clone, Deserialize)]
pub struct BookFeeTier {
    pub volume: Monetary,
    pub maker: Monetary,
    pub taker: Monetary,
}

/// Fee structure for a book
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookFees {
    #[serde(default)]
    pub flat_rate: Option<BookFlatRate>,
    #[serde(default)]
    pub structure: Vec<BookFeeTier>,
}

/// Order placement limits for one exchange book
#[derive(Debug, Clone, Deserialize)]
pub struct ExchangeOrderBook {
    /// Order book symbol
    pub book: Book,
    /// Default chart type (depth, candle, hollow, line, trading view)
    #[serde(default)]
    pub default_chart: Option<String>,
    /// Minimum amount of major when placing orders
    pub minimum_amount: Monetary,
    /// Maximum amount of major when placing orders
    pub maximum_amount: Monetary,
    /// Minimum price when placing orders
    pub minimum_price: Monetary,
    /// Maximum price when placing orders
    pub maximum_price: Monetary,
    /// Minimum value (amount*price) when placing orders
    pub minimum_value: Monetary,
    /// Maximum value (amount*price) when placing orders
    pub maximum_value: Monetary,
    /// Minimum price increment between consecutive bid/offer prices
    #[serde(default)]
    pub tick_size: Option<Monetary>,
    /// Fee structure for this book
    #[serde(default)]
    pub fees: Option<BookFees>,
}

/// A deposit into the user's account
#[derive(Debug, Clone, Deserialize)]
pub struct Funding {
    pub fid: String,
    pub currency: Currency,
    pub method: String,
    pub amount: Monetary,
    pub status: String,
    pub created_at: Timestamp,
    #[serde(default)]
    pub details: HashMap<String, serde_json::Value>,
}

/// A withdrawal from the user's account
#[derive(Debug, Clone, Deserialize)]
pub struct Withdrawal {
    pub wid: String,
    pub status: String,
    pub created_at: Timestamp,
    pub currency: Currency,
    pub method: String,
    pub amount: Monetary,
    #[serde(default)]
    pub details: HashMap<String, serde_json::Value>,
}

/// A single balance change inside a ledger entry
#[derive(Debug, Clone, Deserialize)]
pub struct BalanceUpdate {
    pub currency: Currency,
    pub amount: Monetary,
}

/// One operation on the user's ledger
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerEntry {
    pub eid: String,
    pub operation: Operation,
    pub created_at: Timestamp,
    #[serde(default)]
    pub balance_updates: Vec<BalanceUpdate>,
    /// Operation-specific details; shape varies by operation
    #[serde(default)]
    pub details: HashMap<String, serde_json::Value>,
}
