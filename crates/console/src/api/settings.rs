//! Business settings endpoints of the ShopDesk API.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use shopdesk_core::Currency;
use tracing::instrument;

use super::ApiError;
use super::client::ApiClient;

// =============================================================================
// Domain Types
// =============================================================================

/// Business branding and invoicing settings.
///
/// One record per installation; the same shape is read and written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessConfig {
    /// Business name shown on invoices.
    pub business_name: String,
    /// Logo URL for invoice headers, if set.
    pub logo_url: Option<String>,
    /// Currency invoices are issued in.
    pub base_currency: Currency,
    /// Contact email printed on invoices, if set.
    pub contact_email: Option<String>,
}

impl Default for BusinessConfig {
    fn default() -> Self {
        Self {
            business_name: "My Shopper".to_string(),
            logo_url: None,
            base_currency: Currency::default(),
            contact_email: None,
        }
    }
}

// =============================================================================
// API Methods
// =============================================================================

impl ApiClient {
    /// Fetch the business settings.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failures or error statuses.
    #[instrument(skip(self, token))]
    pub async fn get_settings(&self, token: &SecretString) -> Result<BusinessConfig, ApiError> {
        self.get_json(token, "/settings/").await
    }

    /// Replace the business settings.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failures or error statuses.
    #[instrument(skip(self, token, settings))]
    pub async fn update_settings(
        &self,
        token: &SecretString,
        settings: &BusinessConfig,
    ) -> Result<BusinessConfig, ApiError> {
        self.put_json(token, "/settings/", settings).await
    }
}
