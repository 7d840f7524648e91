//! Client (customer) endpoints of the ShopDesk API.

use chrono::NaiveDateTime;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use shopdesk_core::ClientId;
use tracing::instrument;

use super::ApiError;
use super::client::ApiClient;

// =============================================================================
// Domain Types
// =============================================================================

/// A client as returned by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct Client {
    /// Client ID.
    pub id: ClientId,
    /// First name.
    pub name: String,
    /// Last name.
    pub last_name: String,
    /// Contact email, if any.
    pub email: Option<String>,
    /// Phone number, if any.
    pub phone: Option<String>,
    /// Street address, if any.
    pub address: Option<String>,
    /// When the client was registered.
    pub created_at: NaiveDateTime,
}

impl Client {
    /// First and last name joined, as shown in tables and dropdowns.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.last_name)
    }
}

/// Body for creating or updating a client.
///
/// Optional fields serialize as `null` when empty so an update can clear
/// a previously set value.
#[derive(Debug, Clone, Serialize)]
pub struct ClientPayload {
    /// First name (required).
    pub name: String,
    /// Last name (required).
    pub last_name: String,
    /// Contact email.
    pub email: Option<String>,
    /// Phone number.
    pub phone: Option<String>,
    /// Street address.
    pub address: Option<String>,
}

// =============================================================================
// API Methods
// =============================================================================

impl ApiClient {
    /// Fetch all clients.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failures or error statuses.
    #[instrument(skip(self, token))]
    pub async fn list_clients(&self, token: &SecretString) -> Result<Vec<Client>, ApiError> {
        self.get_json(token, "/clients/").await
    }

    /// Fetch a single client by ID.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if the client does not exist.
    #[instrument(skip(self, token), fields(client_id = %id))]
    pub async fn get_client(
        &self,
        token: &SecretString,
        id: ClientId,
    ) -> Result<Client, ApiError> {
        self.get_json(token, &format!("/clients/{id}")).await
    }

    /// Register a new client. The API answers 201 with the stored record.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failures or error statuses.
    #[instrument(skip(self, token, payload))]
    pub async fn create_client(
        &self,
        token: &SecretString,
        payload: &ClientPayload,
    ) -> Result<Client, ApiError> {
        self.post_json(token, "/clients/", payload).await
    }

    /// Update an existing client.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if the client does not exist.
    #[instrument(skip(self, token, payload), fields(client_id = %id))]
    pub async fn update_client(
        &self,
        token: &SecretString,
        id: ClientId,
        payload: &ClientPayload,
    ) -> Result<Client, ApiError> {
        self.put_json(token, &format!("/clients/{id}"), payload).await
    }

    /// Delete a client. The API answers 204.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if the client does not exist.
    #[instrument(skip(self, token), fields(client_id = %id))]
    pub async fn delete_client(&self, token: &SecretString, id: ClientId) -> Result<(), ApiError> {
        self.delete(token, &format!("/clients/{id}")).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_client_deserializes_api_shape() {
        let json = r#"{
            "id": "c56a4180-65aa-42ec-a945-5fd21dec0538",
            "name": "Maria",
            "last_name": "Gonzalez",
            "email": "maria@example.com",
            "phone": null,
            "address": "123 Main St",
            "created_at": "2026-03-14T09:26:53.589793"
        }"#;

        let client: Client = serde_json::from_str(json).unwrap();
        assert_eq!(client.full_name(), "Maria Gonzalez");
        assert_eq!(client.email.as_deref(), Some("maria@example.com"));
        assert!(client.phone.is_none());
        assert_eq!(client.id.short(), "c56a4180");
    }

    #[test]
    fn test_payload_serializes_empty_fields_as_null() {
        let payload = ClientPayload {
            name: "Maria".to_string(),
            last_name: "Gonzalez".to_string(),
            email: None,
            phone: Some("+56 9 1234 5678".to_string()),
            address: None,
        };

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["email"], serde_json::Value::Null);
        assert_eq!(json["phone"], "+56 9 1234 5678");
    }
}
