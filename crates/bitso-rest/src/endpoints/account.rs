//! Private account endpoints
//!
//! All of these require credentials; the client refuses to construct the
//! group without them.

use crate::client::BitsoClient;
use crate::endpoints::Pagination;
use crate::error::RestResult;
use bitso_types::{
    Balance, Book, CustomerFees, Funding, LedgerEntry, Operation, UserOrder, UserOrderTrade,
    UserTrade, Withdrawal,
};
use serde::Deserialize;
use tracing::instrument;

/// Private account endpoints
pub struct AccountEndpoints<'a> {
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

#[derive(Deserialize)]
struct BalancesPayload {
    balances: Vec<Balance>,
}

impl<'a> AccountEndpoints<'a> {
    pub(crate) fn new(client: &'a BitsoClient) -> Self {
        Self { client }
    }

    /// The user's balances for all supported currencies
    #[instrument(skip(self))]
    pub async fn balances(&self) -> RestResult<Vec<Balance>> {
        let res: ItemPayload<BalancesPayload> = self.client.get("/balance", &[]).await?;
        Ok(res.payload.balances)
    }

    /// Customer fees for all books plus withdrawal fees
    #[instrument(skip(self))]
    pub async fn fees(&self) -> RestResult<CustomerFees> {
        let res: ItemPayload<CustomerFees> = self.client.get("/fees", &[]).await?;
        Ok(res.payload)
    }

    /// All of the user's registered operations
    #[instrument(skip(self, pagination))]
    pub async fn ledger(&self, pagination: &Pagination) -> RestResult<Vec<LedgerEntry>> {
        let mut params = Vec::new();
        pagination.push_params(&mut params);
        let res: ListPayload<LedgerEntry> = self.client.get("/ledger", &params).await?;
        Ok(res.payload)
    }

    /// The user's registered operations, filtered by operation type
    #[instrument(skip(self, pagination))]
    pub async fn ledger_by_operation(
        &self,
        operation: Operation,
        pagination: &Pagination,
    ) -> RestResult<Vec<LedgerEntry>> {
        let mut params = Vec::new();
        pagination.push_params(&mut params);
        let endpoint = format!("/ledger/{}", operation.endpoint_segment());
        let res: ListPayload<LedgerEntry> = self.client.get(&endpoint, &params).await?;
        Ok(res.payload)
    }

    /// Detailed info on the user's fundings
    #[instrument(skip(self, pagination))]
    pub async fn fundings(&self, pagination: &Pagination) -> RestResult<Vec<Funding>> {
        let mut params = Vec::new();
        pagination.push_params(&mut params);
        let res: ListPayload<Funding> = self.client.get("/fundings/", &params).await?;
        Ok(res.payload)
    }

    /// Detailed info on the user's withdrawals
    #[instrument(skip(self, pagination))]
    pub async fn withdrawals(&self, pagination: &Pagination) -> RestResult<Vec<Withdrawal>> {
        let mut params = Vec::new();
        pagination.push_params(&mut params);
        let res: ListPayload<Withdrawal> = self.client.get("/withdrawals", &params).await?;
        Ok(res.payload)
    }

    /// The user's trades, optionally filtered by book
    #[instrument(skip(self, pagination))]
    pub async fn user_trades(
        &self,
        book: Option<&Book>,
        pagination: &Pagination,
    ) -> RestResult<Vec<UserTrade>> {
        let mut params = Vec::new();
        if let Some(book) = book {
            params.push(("book", book.to_string()));
        }
        pagination.push_params(&mut params);
        let res: ListPayload<UserTrade> = self.client.get("/user_trades", &params).await?;
        Ok(res.payload)
    }

    /// The user's trades attributed to one order
    #[instrument(skip(self))]
    pub async fn order_trades(&self, oid: &str) -> RestResult<Vec<UserOrderTrade>> {
        let endpoint = format!("/order_trades/{}", oid);
        let res: ListPayload<UserOrderTrade> = self.client.get(&endpoint, &[]).await?;
        Ok(res.payload)
    }

    /// The user's open orders, optionally filtered by book
    #[instrument(skip(self))]
    pub async fn open_orders(&self, book: Option<&Book>) -> RestResult<Vec<UserOrder>> {
        let mut params = Vec::new();
        if let Some(book) = book {
            params.push(("book", book.to_string()));
        }
        let res: ListPayload<UserOrder> = self.client.get("/open_orders", &params).await?;
        Ok(res.payload)
    }
}
