//! Private trading endpoints: placing, cancelling and looking up orders

use crate::client::BitsoClient;
use crate::error::{RestError, RestResult};
use bitso_types::{OrderPlacement, UserOrder};
use serde::Deserialize;
use tracing::instrument;

/// Private trading endpoints
pub struct TradingEndpoints<'a> {
    client: &'a BitsoClient,
}

#[derive(Deserialize)]
struct OrdersPayload {
    payload: Vec<UserOrder>,
}

#[derive(Deserialize)]
struct CancelledPayload {
    payload: Vec<String>,
}

#[derive(Deserialize)]
struct PlacedPayload {
    payload: PlacedOrder,
}

#[derive(Deserialize)]
struct PlacedOrder {
    oid: String,
}

impl<'a> TradingEndpoints<'a> {
    pub(crate) fn new(client: &'a BitsoClient) -> Self {
        Self { client }
    }

    /// Details for one or more orders by ID
    #[instrument(skip(self))]
    pub async fn lookup_orders(&self, oids: &[&str]) -> RestResult<Vec<UserOrder>> {
        let endpoint = format!("/orders/{}", oids.join(","));
        let res: OrdersPayload = self.client.get(&endpoint, &[]).await?;
        Ok(res.payload)
    }

    /// Details of a single order
    ///
    /// A successful response with an empty result list means the order does
    /// not exist; that is reported as [`RestError::OrderNotFound`], never as
    /// an empty success.
    #[instrument(skip(self))]
    pub async fn lookup_order(&self, oid: &str) -> RestResult<UserOrder> {
        let mut orders = self.lookup_orders(&[oid]).await?;
        if orders.is_empty() {
            return Err(RestError::OrderNotFound {
                oid: oid.to_string(),
            });
        }
        Ok(orders.swap_remove(0))
    }

    /// Place a buy or sell order (market or limit), returning the order ID
    #[instrument(skip(self, order))]
    pub async fn place_order(&self, order: &OrderPlacement) -> RestResult<String> {
        let res: PlacedPayload = self.client.post("/orders/", order).await?;
        Ok(res.payload.oid)
    }

    /// Cancel open orders; returns the IDs that were cancelled
    #[instrument(skip(self))]
    pub async fn cancel_orders(&self, oids: &[&str]) -> RestResult<Vec<String>> {
        let endpoint = format!("/orders/{}", oids.join(","));
        let res: CancelledPayload = self.client.delete(&endpoint).await?;
        Ok(res.payload)
    }

    /// Cancel one open order
    #[instrument(skip(self))]
    pub async fn cancel_order(&self, oid: &str) -> RestResult<Vec<String>> {
        self.cancel_orders(&[oid]).await
    }
}
