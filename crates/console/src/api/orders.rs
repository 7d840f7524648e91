//! Order endpoints of the ShopDesk API.
//!
//! Totals, taxes, commissions, and profit are computed server-side; the
//! console sends raw item inputs and renders whatever comes back.

use chrono::{NaiveDate, NaiveDateTime};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use shopdesk_core::{ClientId, OrderId, OrderStatus, UserId};
use tracing::instrument;

use super::ApiError;
use super::client::ApiClient;

// =============================================================================
// Domain Types
// =============================================================================

/// An order as returned by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct Order {
    /// Order ID.
    pub id: OrderId,
    /// Client the order belongs to.
    pub client_id: ClientId,
    /// User who registered the order.
    pub user_id: UserId,
    /// Current lifecycle status.
    pub status: OrderStatus,
    /// Order date.
    pub date: NaiveDateTime,
    /// Payment method, e.g. `"Zelle"`.
    pub payment_method: Option<String>,
    /// Bank used for the payment, if any.
    pub payment_bank: Option<String>,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Sum of per-item tax amounts.
    pub total_tax: f64,
    /// Sum of per-item commission amounts.
    pub total_commission: f64,
    /// Net profit (commissions) on the order.
    pub total_profit: f64,
    /// Grand total charged to the client.
    pub total_amount: f64,
    /// When the order record was created.
    pub created_at: NaiveDateTime,
    /// Line items with server-computed amounts.
    pub items: Vec<OrderItem>,
}

/// A line item with amounts computed by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderItem {
    /// Product name.
    pub name: String,
    /// Units ordered.
    pub quantity: u32,
    /// Unit price before tax and commission.
    pub base_price: f64,
    /// Tax percentage applied.
    pub tax_percent: f64,
    /// Commission percentage applied.
    pub commission_percent: f64,
    /// Computed tax amount.
    pub tax_amount: f64,
    /// Computed commission amount.
    pub commission_amount: f64,
    /// Final per-line price including tax and commission.
    pub final_price: f64,
    /// Computed profit on the line.
    pub profit_amount: f64,
}

/// Body for creating an order.
#[derive(Debug, Clone, Serialize)]
pub struct NewOrder {
    /// Client the order is for.
    pub client_id: ClientId,
    /// Order date (serialized as `YYYY-MM-DD`).
    pub date: NaiveDate,
    /// Payment method.
    pub payment_method: String,
    /// Bank used for the payment.
    pub payment_bank: Option<String>,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Raw item inputs; the API computes all derived amounts.
    pub items: Vec<NewOrderItem>,
}

/// A raw item input for a new order.
#[derive(Debug, Clone, Serialize)]
pub struct NewOrderItem {
    /// Product name.
    pub name: String,
    /// Unit price before tax and commission.
    pub base_price: f64,
    /// Tax percentage.
    pub tax_percent: f64,
    /// Commission percentage.
    pub commission_percent: f64,
    /// Units ordered.
    pub quantity: u32,
}

/// Body for the status update endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct StatusUpdate {
    /// New lifecycle status.
    pub status: OrderStatus,
}

// =============================================================================
// API Methods
// =============================================================================

impl ApiClient {
    /// Fetch all orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failures or error statuses.
    #[instrument(skip(self, token))]
    pub async fn list_orders(&self, token: &SecretString) -> Result<Vec<Order>, ApiError> {
        self.get_json(token, "/orders/").await
    }

    /// Create an order. The API answers 201 with computed totals.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failures or error statuses.
    #[instrument(skip(self, token, order), fields(client_id = %order.client_id))]
    pub async fn create_order(
        &self,
        token: &SecretString,
        order: &NewOrder,
    ) -> Result<Order, ApiError> {
        self.post_json(token, "/orders/", order).await
    }

    /// Set an order's lifecycle status.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if the order does not exist.
    #[instrument(skip(self, token), fields(order_id = %id, status = %status))]
    pub async fn update_order_status(
        &self,
        token: &SecretString,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Order, ApiError> {
        self.patch_json(token, &format!("/orders/{id}/status"), &StatusUpdate { status })
            .await
    }

    /// Download the invoice PDF for an order.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if the order does not exist.
    #[instrument(skip(self, token), fields(order_id = %id))]
    pub async fn download_invoice(
        &self,
        token: &SecretString,
        id: OrderId,
    ) -> Result<Vec<u8>, ApiError> {
        self.get_bytes(token, &format!("/orders/{id}/pdf")).await
    }
}
