//! Main REST client and transport pipeline

use crate::credentials::{Credentials, NonceSource};
use crate::endpoints::{AccountEndpoints, MarketEndpoints, TradingEndpoints};
use crate::error::{RestError, RestResult};
use crate::rate_limit::TicketLimiter;

use bitso_types::{Balance, Book, Envelope, OrderBook, OrderPlacement, Ticker, UserOrder};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};

/// Default API base URL
const API_BASE_URL: &str = "https://bitso.com/api";
/// Default API version
const API_VERSION: &str = "v3";
/// Default request timeout
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Bitso REST API client
///
/// Cloning is cheap; clones share the same configuration, nonce source and
/// rate limiter. Base URL and credentials may be changed at any time, safely
/// concurrent with in-flight requests.
#[derive(Clone)]
pub struct BitsoClient {
    inner: Arc<Inner>,
}

struct Inner {
    http: reqwest::Client,
    // Runtime-mutable configuration; readers take the lock per request.
    config: parking_lot::RwLock<MutableConfig>,
    nonce: NonceSource,
    limiter: TicketLimiter,
}

#[derive(Debug, Clone)]
struct MutableConfig {
    base_url: String,
    version: String,
    credentials: Option<Credentials>,
}

impl BitsoClient {
    /// Create a new client without authentication
    ///
    /// Only public endpoints will be available.
    pub fn new() -> Self {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with credentials
    pub fn with_credentials(credentials: Credentials) -> Self {
        Self::with_config(ClientConfig::default().with_credentials(credentials))
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_deref().unwrap_or("bitso-rest/0.1.0"))
            .build()
            .expect("Failed to create HTTP client");

        info!("Created Bitso REST client");

        Self {
            inner: Arc::new(Inner {
                http,
                config: parking_lot::RwLock::new(MutableConfig {
                    base_url: config.base_url.trim_end_matches('/').to_string(),
                    version: config.version,
                    credentials: config.credentials,
                }),
                nonce: NonceSource::new(),
                limiter: TicketLimiter::new(config.burst_interval),
            }),
        }
    }

    /// Check if the client has credentials for private endpoints
    pub fn has_credentials(&self) -> bool {
        self.inner.config.read().credentials.is_some()
    }

    /// Set or clear the credentials used for private endpoints
    pub fn set_credentials(&self, credentials: Option<Credentials>) {
        self.inner.config.write().credentials = credentials;
    }

    /// The current API base URL (without version)
    pub fn base_url(&self) -> String {
        self.inner.config.read().base_url.clone()
    }

    /// Point the client at a different API host
    pub fn set_base_url(&self, base_url: impl AsRef<str>) {
        self.inner.config.write().base_url = base_url.as_ref().trim_end_matches('/').to_string();
    }

    /// The current burst interval (zero means throttling is disabled)
    pub fn burst_interval(&self) -> Duration {
        self.inner.limiter.interval()
    }

    /// Set the minimum spacing between outbound requests
    pub fn set_burst_interval(&self, interval: Duration) {
        self.inner.limiter.set_interval(interval);
    }

    // ========================================================================
    // Endpoint groups
    // ========================================================================

    /// Public market data endpoints
    pub fn market(&self) -> MarketEndpoints<'_> {
        MarketEndpoints::new(self)
    }

    /// Private account endpoints (requires credentials)
    pub fn account(&self) -> RestResult<AccountEndpoints<'_>> {
        if !self.has_credentials() {
            return Err(RestError::AuthRequired);
        }
        Ok(AccountEndpoints::new(self))
    }

    /// Private trading endpoints (requires credentials)
    pub fn trading(&self) -> RestResult<TradingEndpoints<'_>> {
        if !self.has_credentials() {
            return Err(RestError::AuthRequired);
        }
        Ok(TradingEndpoints::new(self))
    }

    // ========================================================================
    // Convenience delegations
    // ========================================================================

    /// Get trading information for one book
    pub async fn ticker(&self, book: &Book) -> RestResult<Ticker> {
        self.market().ticker(book).await
    }

    /// Get the public order book for one market
    pub async fn order_book(&self, book: &Book, aggregate: bool) -> RestResult<OrderBook> {
        self.market().order_book(book, aggregate).await
    }

    /// Get the user's balances for all currencies
    pub async fn balances(&self) -> RestResult<Vec<Balance>> {
        self.account()?.balances().await
    }

    /// Place a buy or sell order, returning the new order ID
    pub async fn place_order(&self, order: &OrderPlacement) -> RestResult<String> {
        self.trading()?.place_order(order).await
    }

    /// Cancel one open order
    pub async fn cancel_order(&self, oid: &str) -> RestResult<Vec<String>> {
        self.trading()?.cancel_order(oid).await
    }

    /// Look up one order by ID
    ///
    /// An empty result translates to [`RestError::OrderNotFound`].
    pub async fn lookup_order(&self, oid: &str) -> RestResult<UserOrder> {
        self.trading()?.lookup_order(oid).await
    }

    // ========================================================================
    // Transport
    // ========================================================================

    fn endpoint_url(&self, endpoint: &str, query: &[(&str, String)]) -> RestResult<Url> {
        let (base_url, version) = {
            let config = self.inner.config.read();
            (config.base_url.clone(), config.version.clone())
        };

        let raw = format!("{}/{}{}", base_url, version, endpoint);
        let mut url = Url::parse(&raw).map_err(|e| RestError::InvalidUrl(e.to_string()))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    /// Execute one call against the API and decode the enveloped response
    ///
    /// The body is decoded twice on purpose: once as the [`Envelope`] to
    /// classify success, then as the caller's destination shape over the
    /// full body, since `payload` sits next to the envelope fields at the
    /// top level.
    pub(crate) async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        query: &[(&str, String)],
        body: Option<Vec<u8>>,
    ) -> RestResult<T> {
        let url = self.endpoint_url(endpoint, query)?;
        debug!(%method, endpoint, "issuing request");

        self.inner.limiter.acquire().await;

        let body_bytes = body.unwrap_or_default();
        let mut request = self.inner.http.request(method.clone(), url.clone());

        if method == Method::POST {
            request = request
                .header(CONTENT_TYPE, "application/json")
                .header(ACCEPT, "application/json");
        }

        // Sign with the path-and-query exactly as it will be sent; no
        // credentials means the request goes out unsigned.
        let credentials = self.inner.config.read().credentials.clone();
        if let Some(credentials) = credentials {
            let request_uri = match url.query() {
                Some(q) => format!("{}?{}", url.path(), q),
                None => url.path().to_string(),
            };
            let nonce = self.inner.nonce.next();
            let header = credentials.authorization(nonce, method.as_str(), &request_uri, &body_bytes);
            request = request.header(AUTHORIZATION, header);
        }

        if !body_bytes.is_empty() {
            request = request.body(body_bytes);
        }

        let response = request.send().await?;
        let status = response.status();
        let buf = response.bytes().await?;
        debug!(%status, bytes = buf.len(), "response received");

        let envelope: Envelope = serde_json::from_slice(&buf).map_err(RestError::decode)?;

        if !envelope.success {
            let body = envelope.error.unwrap_or_default();
            error!(code = body.code.value(), message = %body.message, "api error");
            return Err(RestError::Api {
                code: body.code,
                message: body.message,
            });
        }

        serde_json::from_slice(&buf).map_err(RestError::decode)
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> RestResult<T> {
        self.request(Method::GET, endpoint, query, None).await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> RestResult<T> {
        let buf = serde_json::to_vec(body).map_err(RestError::decode)?;
        self.request(Method::POST, endpoint, &[], Some(buf)).await
    }

    pub(crate) async fn delete<T: DeserializeOwned>(&self, endpoint: &str) -> RestResult<T> {
        self.request(Method::DELETE, endpoint, &[], None).await
    }
}

impl Default for BitsoClient {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for BitsoClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BitsoClient")
            .field("base_url", &self.base_url())
            .field("has_credentials", &self.has_credentials())
            .finish()
    }
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL, without the version segment
    pub base_url: String,
    /// API version segment (default "v3")
    pub version: String,
    /// API credentials (optional)
    pub credentials: Option<Credentials>,
    /// Minimum spacing between requests; zero disables throttling
    pub burst_interval: Duration,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Custom user agent
    pub user_agent: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: API_BASE_URL.to_string(),
            version: API_VERSION.to_string(),
            credentials: None,
            burst_interval: Duration::ZERO,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
        }
    }
}

impl ClientConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set credentials
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set the burst interval
    pub fn with_burst_interval(mut self, interval: Duration) -> Self {
        self.burst_interval = interval;
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set a custom user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_without_credentials() {
        let client = BitsoClient::new();
        assert!(!client.has_credentials());
        assert_eq!(client.base_url(), API_BASE_URL);
    }

    #[test]
    fn test_client_config_builder() {
        let config = ClientConfig::new()
            .with_base_url("https://stage.bitso.com/api/")
            .with_burst_interval(Duration::from_millis(500))
            .with_timeout(60)
            .with_user_agent("test-agent");

        assert_eq!(config.base_url, "https://stage.bitso.com/api/");
        assert_eq!(config.burst_interval, Duration::from_millis(500));
        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.user_agent, Some("test-agent".to_string()));
    }

    #[test]
    fn test_auth_required_error() {
        let client = BitsoClient::new();
        assert!(matches!(client.account(), Err(RestError::AuthRequired)));
        assert!(matches!(client.trading(), Err(RestError::AuthRequired)));
    }

    #[test]
    fn test_set_credentials_at_runtime() {
        let client = BitsoClient::new();
        client.set_credentials(Some(Credentials::new("k", "s")));
        assert!(client.has_credentials());
        assert!(client.account().is_ok());

        client.set_credentials(None);
        assert!(!client.has_credentials());
    }

    #[test]
    fn test_endpoint_url_building() {
        let client = BitsoClient::new();
        let url = client.endpoint_url("/ticker", &[("book", "btc_mxn".to_string())]).unwrap();
        assert_eq!(url.as_str(), "https://bitso.com/api/v3/ticker?book=btc_mxn");

        let url = client.endpoint_url("/available_books", &[]).unwrap();
        assert_eq!(url.as_str(), "https://bitso.com/api/v3/available_books");
    }

    #[test]
    fn test_base_url_trailing_slash_normalized() {
        let client = BitsoClient::new();
        client.set_base_url("https://stage.bitso.com/api///");
        assert_eq!(client.base_url(), "https://stage.bitso.com/api");
    }
}
