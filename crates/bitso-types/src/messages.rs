//! WebSocket frame types and the tagged-union decode
//!
//! Inbound frames carry a `type` discriminator. Decoding is two-pass: a
//! minimal envelope is read first for the tag and payload presence, then the
//! full frame is parsed again into the variant the tag selects. A single
//! polymorphic decode is never attempted.

use crate::{Book, Channel, Monetary, Tid};
use serde::{Deserialize, Serialize};

/// Outbound subscription control frame
#[derive(Debug, Clone, Serialize)]
pub struct SubscribeMessage {
    /// Always "subscribe"
    pub action: &'static str,
    /// The book to subscribe to
    pub book: Book,
    /// The channel name
    #[serde(rename = "type")]
    pub channel: Channel,
}

impl SubscribeMessage {
    /// Create a subscription request for the given book and channel
    pub fn new(book: Book, channel: Channel) -> Self {
        Self {
            action: "subscribe",
            book,
            channel,
        }
    }
}

/// Generic reply: subscription acks and anything unrecognized
#[derive(Debug, Clone, Deserialize)]
pub struct Reply {
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub time: Option<u64>,
    #[serde(rename = "type", default)]
    pub message_type: String,
}

/// One executed trade inside a `trades` frame
#[derive(Debug, Clone, Deserialize)]
pub struct TradeEntry {
    /// Trade ID
    #[serde(rename = "i")]
    pub tid: Tid,
    /// Major amount traded
    #[serde(rename = "a")]
    pub amount: Monetary,
    /// Price per unit of major
    #[serde(rename = "r")]
    pub price: Monetary,
    /// Minor amount (amount * price)
    #[serde(rename = "v")]
    pub value: Monetary,
    /// Maker order ID
    #[serde(rename = "mo", default)]
    pub maker_order_id: String,
    /// Taker order ID
    #[serde(rename = "to", default)]
    pub taker_order_id: String,
}

/// A `trades` frame
#[derive(Debug, Clone, Deserialize)]
pub struct TradeUpdate {
    pub book: Book,
    pub payload: Vec<TradeEntry>,
}

/// One order-book change inside a `diff-orders` frame
#[derive(Debug, Clone, Deserialize)]
pub struct DiffOrderEntry {
    /// Millisecond timestamp of the change
    #[serde(rename = "d")]
    pub timestamp: u64,
    /// Price level
    #[serde(rename = "r")]
    pub price: Monetary,
    /// 0 for buy, 1 for sell
    #[serde(rename = "t")]
    pub position: u8,
    /// Remaining amount; absent when the order left the book
    #[serde(rename = "a", default)]
    pub amount: Option<Monetary>,
    /// Remaining value; absent when the order left the book
    #[serde(rename = "v", default)]
    pub value: Option<Monetary>,
    /// Order ID
    #[serde(rename = "o", default)]
    pub order_id: String,
}

/// A `diff-orders` frame
#[derive(Debug, Clone, Deserialize)]
pub struct DiffOrderUpdate {
    pub book: Book,
    pub payload: Vec<DiffOrderEntry>,
}

/// One price level in an `orders` snapshot
///
/// This channel transmits JSON numbers, unlike the decimal strings used
/// everywhere else on the API.
#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotOrder {
    #[serde(rename = "r")]
    pub price: f64,
    #[serde(rename = "a")]
    pub amount: f64,
    #[serde(rename = "t")]
    pub position: u8,
    #[serde(rename = "v", default)]
    pub value: f64,
    #[serde(rename = "d", default)]
    pub timestamp: u64,
}

/// Payload of an `orders` snapshot frame
#[derive(Debug, Clone, Deserialize)]
pub struct OrderBookSides {
    #[serde(default)]
    pub bids: Vec<SnapshotOrder>,
    #[serde(default)]
    pub asks: Vec<SnapshotOrder>,
}

/// An `orders` (full order-book snapshot) frame
#[derive(Debug, Clone, Deserialize)]
pub struct OrderBookUpdate {
    pub book: Book,
    pub payload: OrderBookSides,
}

/// A parsed inbound stream frame
#[derive(Debug, Clone)]
pub enum StreamMessage {
    /// Real-time trade executions
    Trades(TradeUpdate),
    /// Order-book deltas
    DiffOrders(DiffOrderUpdate),
    /// Full order-book snapshot
    Orders(OrderBookUpdate),
    /// Keep-alive; dispatchers discard these
    KeepAlive,
    /// Subscription ack, known type without payload, or unknown type
    Reply(Reply),
}

// Minimal first-pass envelope: the tag and whether a payload is present.
#[derive(Deserialize)]
struct FrameEnvelope {
    #[serde(rename = "type", default)]
    message_type: String,
    #[serde(default)]
    payload: Option<serde_json::Value>,
}

impl StreamMessage {
    /// Parse a raw JSON frame
    pub fn parse(json: &str) -> Result<Self, serde_json::Error> {
        let envelope: FrameEnvelope = serde_json::from_str(json)?;

        match envelope.message_type.as_str() {
            "ka" => return Ok(Self::KeepAlive),
            "trades" if envelope.payload.is_some() => {
                let msg: TradeUpdate = serde_json::from_str(json)?;
                return Ok(Self::Trades(msg));
            }
            "diff-orders" if envelope.payload.is_some() => {
                let msg: DiffOrderUpdate = serde_json::from_str(json)?;
                return Ok(Self::DiffOrders(msg));
            }
            "orders" if envelope.payload.is_some() => {
                let msg: OrderBookUpdate = serde_json::from_str(json)?;
                return Ok(Self::Orders(msg));
            }
            _ => {}
        }

        let reply: Reply = serde_json::from_str(json)?;
        Ok(Self::Reply(reply))
    }

    /// True for frames a dispatcher should not forward
    pub fn is_keep_alive(&self) -> bool {
        matches!(self, Self::KeepAlive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscribe_message_wire_form() {
        let msg = SubscribeMessage::new("btc_mxn".parse().unwrap(), Channel::Trades);
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["action"], "subscribe");
        assert_eq!(json["book"], "btc_mxn");
        assert_eq!(json["type"], "trades");
    }

    #[test]
    fn test_parse_keep_alive() {
        let msg = StreamMessage::parse(r#"{"type": "ka"}"#).unwrap();
        assert!(msg.is_keep_alive());
    }

    #[test]
    fn test_parse_trades() {
        let json = r#"{
            "type": "trades",
            "book": "btc_mxn",
            "payload": [
                {"i": 51966, "a": "0.0075", "r": "5638.54", "v": "42.28", "mo": "mo1", "to": "to1"},
                {"i": "51967", "a": "0.0020", "r": "5638.50", "v": "11.27", "mo": "mo2", "to": "to2"}
            ]
        }"#;
        match StreamMessage::parse(json).unwrap() {
            StreamMessage::Trades(update) => {
                assert_eq!(update.book.to_string(), "btc_mxn");
                assert_eq!(update.payload.len(), 2);
                assert_eq!(update.payload[0].tid.value(), 51966);
                assert_eq!(update.payload[1].tid.value(), 51967);
            }
            other => panic!("expected trades, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_diff_orders() {
        let json = r#"{
            "type": "diff-orders",
            "book": "btc_mxn",
            "payload": [
                {"d": 1477215816, "r": "5611.74", "t": 1, "a": "0.00199", "v": "11.16", "o": "qlyqs7wbyxkbs0cs"},
                {"d": 1477215817, "r": "5612.00", "t": 0, "o": "gone0000000000000"}
            ]
        }"#;
        match StreamMessage::parse(json).unwrap() {
            StreamMessage::DiffOrders(update) => {
                assert_eq!(update.payload.len(), 2);
                assert!(update.payload[0].amount.is_some());
                // Absent amount means the order left the book.
                assert!(update.payload[1].amount.is_none());
            }
            other => panic!("expected diff-orders, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_orders_snapshot() {
        let json = r#"{
            "type": "orders",
            "book": "btc_mxn",
            "payload": {
                "bids": [{"r": 5632.24, "a": 1.34, "t": 0, "v": 7547.2, "d": 1477215816}],
                "asks": [{"r": 5633.44, "a": 0.4259, "t": 1, "v": 2399.2, "d": 1477215816}]
            }
        }"#;
        match StreamMessage::parse(json).unwrap() {
            StreamMessage::Orders(update) => {
                assert_eq!(update.payload.bids.len(), 1);
                assert_eq!(update.payload.asks[0].price, 5633.44);
            }
            other => panic!("expected orders, got {:?}", other),
        }
    }

    #[test]
    fn test_known_type_without_payload_is_reply() {
        let json = r#"{"action": "subscribe", "response": "ok", "time": 1455831538045, "type": "trades"}"#;
        match StreamMessage::parse(json).unwrap() {
            StreamMessage::Reply(reply) => {
                assert_eq!(reply.response.as_deref(), Some("ok"));
                assert_eq!(reply.message_type, "trades");
            }
            other => panic!("expected reply, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_type_is_reply() {
        let msg = StreamMessage::parse(r#"{"type": "candles", "payload": []}"#).unwrap();
        assert!(matches!(msg, StreamMessage::Reply(_)));
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(StreamMessage::parse("not json").is_err());
        // Known tag with a payload of the wrong shape is an error too.
        assert!(StreamMessage::parse(r#"{"type": "trades", "payload": 7}"#).is_err());
    }
}
