//! Dashboard endpoints of the ShopDesk API.

use secrecy::SecretString;
use serde::Deserialize;
use shopdesk_core::ClientId;
use tracing::instrument;

use super::ApiError;
use super::client::ApiClient;

// =============================================================================
// Domain Types
// =============================================================================

/// Aggregated metrics for one calendar month.
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardMetrics {
    /// Month the metrics cover (1-12).
    pub month: u32,
    /// Year the metrics cover.
    pub year: i32,
    /// Revenue across the month's orders.
    pub total_revenue: f64,
    /// Profit (commissions) across the month's orders.
    pub total_profit: f64,
    /// Number of orders placed in the month.
    pub order_count: i64,
    /// Average order value. The API names this field in Spanish.
    #[serde(rename = "ticket_promedio")]
    pub average_ticket: f64,
}

/// A top client by lifetime spend.
#[derive(Debug, Clone, Deserialize)]
pub struct BestClient {
    /// Client ID.
    pub client_id: ClientId,
    /// Full name, joined server-side.
    pub name: String,
    /// Contact email, if any.
    pub email: Option<String>,
    /// Lifetime order count.
    pub total_orders: i64,
    /// Lifetime spend.
    pub total_spent: f64,
}

// =============================================================================
// API Methods
// =============================================================================

impl ApiClient {
    /// Fetch metrics for a month. With no arguments the API reports the
    /// current calendar month.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failures or error statuses.
    #[instrument(skip(self, token))]
    pub async fn monthly_metrics(
        &self,
        token: &SecretString,
        month: Option<u32>,
        year: Option<i32>,
    ) -> Result<DashboardMetrics, ApiError> {
        let path = match (month, year) {
            (None, None) => "/dashboard/metrics".to_string(),
            (Some(m), None) => format!("/dashboard/metrics?month={m}"),
            (None, Some(y)) => format!("/dashboard/metrics?year={y}"),
            (Some(m), Some(y)) => format!("/dashboard/metrics?month={m}&year={y}"),
        };
        self.get_json(token, &path).await
    }

    /// Fetch the top clients by lifetime spend (the API caps the list
    /// server-side, currently at ten).
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failures or error statuses.
    #[instrument(skip(self, token))]
    pub async fn best_clients(&self, token: &SecretString) -> Result<Vec<BestClient>, ApiError> {
        self.get_json(token, "/dashboard/best-clients").await
    }
}
