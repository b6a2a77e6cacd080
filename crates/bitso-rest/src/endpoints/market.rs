//! Public market data endpoints
//!
//! These endpoints don't require authentication.

use crate::client::BitsoClient;
use crate::endpoints::Pagination;
use crate::error::RestResult;
use bitso_types::{Book, ExchangeOrderBook, OrderBook, Ticker, Trade};
use serde::Deserialize;
use tracing::instrument;

/// Public market data endpoints
pub struct MarketEndpoints<'a> {
    client: &'a BitsoClient,
}

#[derive(Deserialize)]
struct ListPayload<T> {
    payload: Vec<T>,
}

#[derive(Deserialize)]
struct ItemPayload<T> {
    payload: T,
}

impl<'a> MarketEndpoints<'a> {
    pub(crate) fn new(client: &'a BitsoClient) -> Self {
        Self { client }
    }

    /// List existing exchange order books and their order placement limits
    #[instrument(skip(self))]
    pub async fn available_books(&self) -> RestResult<Vec<ExchangeOrderBook>> {
        let res: ListPayload<ExchangeOrderBook> =
            self.client.get("/available_books", &[]).await?;
        Ok(res.payload)
    }

    /// Get trading information from all books
    #[instrument(skip(self))]
    pub async fn tickers(&self) -> RestResult<Vec<Ticker>> {
        let res: ListPayload<Ticker> = self.client.get("/ticker", &[]).await?;
        Ok(res.payload)
    }

    /// Get trading information from one book
    #[instrument(skip(self))]
    pub async fn ticker(&self, book: &Book) -> RestResult<Ticker> {
        let params = [("book", book.to_string())];
        let res: ItemPayload<Ticker> = self.client.get("/ticker", &params).await?;
        Ok(res.payload)
    }

    /// Get recent public trades from one book
    #[instrument(skip(self, pagination))]
    pub async fn trades(&self, book: &Book, pagination: &Pagination) -> RestResult<Vec<Trade>> {
        let mut params = vec![("book", book.to_string())];
        pagination.push_params(&mut params);
        let res: ListPayload<Trade> = self.client.get("/trades", &params).await?;
        Ok(res.payload)
    }

    /// Get all open orders in one book
    ///
    /// With `aggregate` set, orders at the same price collapse into one
    /// level and no order IDs are returned.
    #[instrument(skip(self))]
    pub async fn order_book(&self, book: &Book, aggregate: bool) -> RestResult<OrderBook> {
        let params = [
            ("book", book.to_string()),
            ("aggregate", aggregate.to_string()),
        ];
        let res: ItemPayload<OrderBook> = self.client.get("/order_book", &params).await?;
        Ok(res.payload)
    }
}
