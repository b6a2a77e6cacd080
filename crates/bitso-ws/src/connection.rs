//! WebSocket connection management and the frame dispatch loop

use crate::error::{WsError, WsResult};

use bitso_types::{Book, Channel, StreamMessage, SubscribeMessage};
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::time::{timeout, Duration};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, error, info, warn};

/// Default streaming endpoint
const WSS_URL: &str = "wss://ws.bitso.com";

/// Inbox capacity; a full inbox blocks the reader rather than dropping
/// messages.
const INBOX_CAPACITY: usize = 8;

type WsSink = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, Message>;
type WsSource = SplitStream<WebSocketStream<MaybeTlsStream<TcpStream>>>;

/// Streaming connection state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    /// Not connected
    Disconnected,
    /// Connection in progress
    Connecting,
    /// Connected; reader loop running
    Connected,
    /// Close requested, shutting down
    Closing,
    /// Reader loop terminated on a read or parse error
    Faulted,
}

/// Configuration for the streaming connection
#[derive(Debug, Clone)]
pub struct StreamConfig {
    /// WebSocket endpoint URL
    pub endpoint: String,
    /// Connection timeout
    pub connect_timeout: Duration,
    /// Inbox queue capacity
    pub inbox_capacity: usize,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            endpoint: WSS_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            inbox_capacity: INBOX_CAPACITY,
        }
    }
}

impl StreamConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the endpoint URL
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the connection timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the inbox capacity
    pub fn with_inbox_capacity(mut self, capacity: usize) -> Self {
        self.inbox_capacity = capacity.max(1);
        self
    }
}

/// A streaming connection to Bitso
///
/// Owns one WebSocket connection and exactly one background reader task.
/// The reader is the sole producer to the inbox queue; a single logical
/// consumer drains it via [`BitsoStream::take_receiver`].
pub struct BitsoStream {
    config: StreamConfig,
    state: Arc<RwLock<StreamState>>,
    // Bumped on every connect; a reader from an older generation must not
    // touch the state or the sink.
    generation: Arc<AtomicU64>,
    writer: Arc<tokio::sync::Mutex<Option<WsSink>>>,
    inbox: parking_lot::Mutex<Option<mpsc::Receiver<StreamMessage>>>,
    reader: parking_lot::Mutex<Option<tokio::task::JoinHandle<()>>>,
}

impl BitsoStream {
    /// Create a stream with default configuration
    pub fn new() -> Self {
        Self::with_config(StreamConfig::default())
    }

    /// Create a stream with the given configuration
    pub fn with_config(config: StreamConfig) -> Self {
        Self {
            config,
            state: Arc::new(RwLock::new(StreamState::Disconnected)),
            generation: Arc::new(AtomicU64::new(0)),
            writer: Arc::new(tokio::sync::Mutex::new(None)),
            inbox: parking_lot::Mutex::new(None),
            reader: parking_lot::Mutex::new(None),
        }
    }

    /// The current connection state
    pub fn state(&self) -> StreamState {
        *self.state.read()
    }

    /// Check if connected
    pub fn is_connected(&self) -> bool {
        self.state() == StreamState::Connected
    }

    /// Dial the streaming endpoint and start the reader loop
    ///
    /// Valid only while disconnected or faulted; a live connection must be
    /// closed first and [`WsError::AlreadyConnected`] is returned otherwise.
    /// On failure the stream stays `Disconnected` and the error is
    /// returned; nothing is retried.
    pub async fn connect(&self) -> WsResult<()> {
        {
            let mut state = self.state.write();
            match *state {
                StreamState::Disconnected | StreamState::Faulted => {
                    *state = StreamState::Connecting;
                }
                _ => return Err(WsError::AlreadyConnected),
            }
        }
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        info!(endpoint = %self.config.endpoint, "connecting");

        let connect_result =
            timeout(self.config.connect_timeout, connect_async(&self.config.endpoint)).await;

        let ws_stream = match connect_result {
            Ok(Ok((stream, _response))) => stream,
            Ok(Err(e)) => {
                *self.state.write() = StreamState::Disconnected;
                return Err(WsError::ConnectionFailed {
                    url: self.config.endpoint.clone(),
                    reason: e.to_string(),
                });
            }
            Err(_) => {
                *self.state.write() = StreamState::Disconnected;
                return Err(WsError::ConnectionTimeout {
                    url: self.config.endpoint.clone(),
                    timeout: self.config.connect_timeout,
                });
            }
        };

        let (write, read) = ws_stream.split();
        let (tx, rx) = mpsc::channel(self.config.inbox_capacity);

        *self.writer.lock().await = Some(write);
        *self.inbox.lock() = Some(rx);

        let handle = ReaderHandle {
            state: Arc::clone(&self.state),
            writer: Arc::clone(&self.writer),
            current: Arc::clone(&self.generation),
            generation,
        };
        let task = tokio::spawn(read_loop(read, tx, handle));
        *self.reader.lock() = Some(task);

        *self.state.write() = StreamState::Connected;
        info!("connected");
        Ok(())
    }

    /// Subscribe to a channel for one book
    ///
    /// Valid only while connected; returns [`WsError::NotConnected`]
    /// otherwise.
    pub async fn subscribe(&self, book: &Book, channel: Channel) -> WsResult<()> {
        if !self.is_connected() {
            return Err(WsError::NotConnected);
        }

        let message = SubscribeMessage::new(book.clone(), channel);
        let json = serde_json::to_string(&message)?;
        debug!(%book, %channel, "subscribing");

        let mut writer = self.writer.lock().await;
        let sink = writer.as_mut().ok_or(WsError::NotConnected)?;
        sink.send(Message::Text(json))
            .await
            .map_err(|e| WsError::WebSocket(e.to_string()))
    }

    /// Take the inbox receiver
    ///
    /// Returns `Some` on the first call after a successful `connect` and
    /// `None` thereafter; one logical consumer is assumed.
    pub fn take_receiver(&self) -> Option<mpsc::Receiver<StreamMessage>> {
        self.inbox.lock().take()
    }

    /// Close the connection
    ///
    /// Idempotent; a no-op when already disconnected.
    pub async fn close(&self) -> WsResult<()> {
        if self.state() == StreamState::Disconnected {
            return Ok(());
        }
        *self.state.write() = StreamState::Closing;

        if let Some(mut sink) = self.writer.lock().await.take() {
            let _ = sink.send(Message::Close(None)).await;
            let _ = sink.close().await;
        }

        if let Some(handle) = self.reader.lock().take() {
            handle.abort();
        }

        *self.state.write() = StreamState::Disconnected;
        info!("closed");
        Ok(())
    }
}

impl Default for BitsoStream {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for BitsoStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BitsoStream")
            .field("endpoint", &self.config.endpoint)
            .field("state", &self.state())
            .finish()
    }
}

/// The reader's view of the connection it serves
///
/// Writes are gated on the generation: a reader outlived by a newer
/// connection must not clobber its state or close its sink.
struct ReaderHandle {
    state: Arc<RwLock<StreamState>>,
    writer: Arc<tokio::sync::Mutex<Option<WsSink>>>,
    current: Arc<AtomicU64>,
    generation: u64,
}

impl ReaderHandle {
    fn is_current(&self) -> bool {
        self.current.load(Ordering::Acquire) == self.generation
    }

    /// Close the write half and record the terminal state
    async fn shutdown(&self, terminal: StreamState) {
        if !self.is_current() {
            return;
        }
        if let Some(mut sink) = self.writer.lock().await.take() {
            // Initiates the close handshake; best effort on a dying socket.
            let _ = sink.close().await;
        }
        if self.is_current() {
            *self.state.write() = terminal;
        }
    }
}

/// The background reader: classifies each frame and forwards everything but
/// keep-alives to the inbox. Runs until the connection errors, a frame
/// fails to parse, or the stream is closed; every exit path closes the
/// connection.
async fn read_loop(mut read: WsSource, inbox: mpsc::Sender<StreamMessage>, handle: ReaderHandle) {
    while let Some(next) = read.next().await {
        let text = match next {
            Ok(Message::Text(text)) => text,
            Ok(Message::Close(_)) => {
                info!("server closed connection");
                handle.shutdown(StreamState::Disconnected).await;
                return;
            }
            // Ping/pong and binary frames carry nothing for us.
            Ok(_) => continue,
            Err(e) => {
                error!("read error: {}", e);
                handle.shutdown(StreamState::Faulted).await;
                return;
            }
        };

        match StreamMessage::parse(&text) {
            Ok(StreamMessage::KeepAlive) => continue,
            Ok(message) => {
                // A full inbox blocks here; backpressure is preferred over
                // dropping messages.
                if inbox.send(message).await.is_err() {
                    debug!("inbox receiver dropped, stopping reader");
                    handle.shutdown(StreamState::Disconnected).await;
                    return;
                }
            }
            Err(e) => {
                warn!("failed to parse frame: {}", e);
                handle.shutdown(StreamState::Faulted).await;
                return;
            }
        }
    }

    // Stream ended without an explicit close frame.
    handle.shutdown(StreamState::Disconnected).await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let stream = BitsoStream::new();
        assert_eq!(stream.state(), StreamState::Disconnected);
        assert!(!stream.is_connected());
        assert!(stream.take_receiver().is_none());
    }

    #[test]
    fn test_config_builder() {
        let config = StreamConfig::new()
            .with_endpoint("ws://localhost:9999")
            .with_timeout(Duration::from_secs(5))
            .with_inbox_capacity(16);

        assert_eq!(config.endpoint, "ws://localhost:9999");
        assert_eq!(config.connect_timeout, Duration::from_secs(5));
        assert_eq!(config.inbox_capacity, 16);
    }

    #[test]
    fn test_inbox_capacity_floor() {
        let config = StreamConfig::new().with_inbox_capacity(0);
        assert_eq!(config.inbox_capacity, 1);
    }

    #[tokio::test]
    async fn test_subscribe_requires_connection() {
        let stream = BitsoStream::new();
        let err = stream
            .subscribe(&"btc_mxn".parse().unwrap(), Channel::Trades)
            .await
            .unwrap_err();
        assert!(matches!(err, WsError::NotConnected));
    }

    #[tokio::test]
    async fn test_close_is_idempotent_when_disconnected() {
        let stream = BitsoStream::new();
        stream.close().await.unwrap();
        stream.close().await.unwrap();
        assert_eq!(stream.state(), StreamState::Disconnected);
    }

    #[tokio::test]
    async fn test_connect_failure_stays_disconnected() {
        let config = StreamConfig::new()
            .with_endpoint("ws://127.0.0.1:1") // nothing listens here
            .with_timeout(Duration::from_secs(2));
        let stream = BitsoStream::with_config(config);

        let err = stream.connect().await.unwrap_err();
        assert!(matches!(
            err,
            WsError::ConnectionFailed { .. } | WsError::ConnectionTimeout { .. }
        ));
        assert_eq!(stream.state(), StreamState::Disconnected);
    }
}
