//! Client management routes.
//!
//! List, create, edit and delete the business's clients. All writes go
//! straight to the ShopDesk API and come back through a redirect with a
//! banner code, so a refresh never replays the form post.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Form, Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use shopdesk_core::{ClientId, Email};
use tracing::instrument;

use crate::api::{ApiError, Client, ClientPayload};
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireSession;
use crate::state::AppState;

use super::auth::MessageQuery;

// ============================================================================
// Form Types
// ============================================================================

/// Client create/edit form data.
#[derive(Debug, Deserialize)]
pub struct ClientForm {
    pub name: String,
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
}

// ============================================================================
// Templates
// ============================================================================

/// One row of the client table.
#[derive(Debug, Clone)]
pub struct ClientView {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub joined: String,
}

/// Client list page template.
#[derive(Template, WebTemplate)]
#[template(path = "clients/index.html")]
pub struct ClientsTemplate {
    pub current_path: String,
    pub clients: Vec<ClientView>,
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Client create/edit form template.
#[derive(Template, WebTemplate)]
#[template(path = "clients/form.html")]
pub struct ClientFormTemplate {
    pub current_path: String,
    pub heading: String,
    pub action: String,
    pub name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub error: Option<String>,
}

// ============================================================================
// Type Conversions
// ============================================================================

impl From<Client> for ClientView {
    fn from(client: Client) -> Self {
        let name = client.full_name();
        Self {
            id: client.id.to_string(),
            name,
            email: client.email.unwrap_or_else(|| "-".to_string()),
            phone: client.phone.unwrap_or_else(|| "-".to_string()),
            joined: client.created_at.format("%b %d, %Y").to_string(),
        }
    }
}

/// Trim a form field, mapping the empty string to `None`.
fn optional(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Validate form input into an API payload, or return a banner code.
fn build_payload(form: ClientForm) -> std::result::Result<ClientPayload, &'static str> {
    let name = form.name.trim().to_string();
    let last_name = form.last_name.trim().to_string();
    if name.is_empty() || last_name.is_empty() {
        return Err("name_required");
    }

    let email = match optional(form.email) {
        Some(raw) => match raw.parse::<Email>() {
            Ok(email) => Some(email.to_string()),
            Err(_) => return Err("invalid_email"),
        },
        None => None,
    };

    Ok(ClientPayload {
        name,
        last_name,
        email,
        phone: optional(form.phone),
        address: optional(form.address),
    })
}

/// Map a client banner error code to a user-facing message.
fn error_message(code: &str) -> String {
    match code {
        "not_found" => "That client no longer exists.".to_string(),
        "name_required" => "Name and last name are required.".to_string(),
        "invalid_email" => "Enter a valid email address or leave it blank.".to_string(),
        "unavailable" => {
            "The service is temporarily unavailable. Please try again.".to_string()
        }
        _ => "Something went wrong. Please try again.".to_string(),
    }
}

/// Map a client banner success code to a user-facing message.
fn success_message(code: &str) -> String {
    match code {
        "created" => "Client created.".to_string(),
        "updated" => "Client updated.".to_string(),
        "deleted" => "Client deleted.".to_string(),
        _ => "Done.".to_string(),
    }
}

// ============================================================================
// Routes
// ============================================================================

/// `GET /clients` - Client list page.
#[instrument(skip(state, user))]
pub async fn index(
    State(state): State<AppState>,
    RequireSession(user): RequireSession,
    Query(query): Query<MessageQuery>,
) -> Result<ClientsTemplate> {
    let clients = state
        .api()
        .list_clients(&user.token())
        .await?
        .into_iter()
        .map(ClientView::from)
        .collect();

    Ok(ClientsTemplate {
        current_path: "/clients".to_string(),
        clients,
        error: query.error.as_deref().map(error_message),
        success: query.success.as_deref().map(success_message),
    })
}

/// `GET /clients/new` - Empty client form.
#[instrument(skip(_user))]
pub async fn new_form(
    RequireSession(_user): RequireSession,
    Query(query): Query<MessageQuery>,
) -> ClientFormTemplate {
    ClientFormTemplate {
        current_path: "/clients".to_string(),
        heading: "New Client".to_string(),
        action: "/clients".to_string(),
        name: String::new(),
        last_name: String::new(),
        email: String::new(),
        phone: String::new(),
        address: String::new(),
        error: query.error.as_deref().map(error_message),
    }
}

/// `POST /clients` - Create a client.
#[instrument(skip(state, user, form))]
pub async fn create(
    State(state): State<AppState>,
    RequireSession(user): RequireSession,
    Form(form): Form<ClientForm>,
) -> Redirect {
    let payload = match build_payload(form) {
        Ok(payload) => payload,
        Err(code) => return Redirect::to(&format!("/clients/new?error={code}")),
    };

    match state.api().create_client(&user.token(), &payload).await {
        Ok(client) => {
            tracing::info!(client_id = %client.id, "Client created");
            Redirect::to("/clients?success=created")
        }
        Err(ApiError::Unauthorized) => Redirect::to("/logout?error=session_expired"),
        Err(err) => {
            tracing::error!(error = %err, "Failed to create client");
            Redirect::to("/clients/new?error=unavailable")
        }
    }
}

/// `GET /clients/{id}/edit` - Pre-filled client form.
#[instrument(skip(state, user))]
pub async fn edit_form(
    State(state): State<AppState>,
    RequireSession(user): RequireSession,
    Path(id): Path<ClientId>,
    Query(query): Query<MessageQuery>,
) -> Result<Response> {
    let client = match state.api().get_client(&user.token(), id).await {
        Ok(client) => client,
        Err(ApiError::NotFound) => {
            return Ok(Redirect::to("/clients?error=not_found").into_response());
        }
        Err(err) => return Err(err.into()),
    };

    Ok(ClientFormTemplate {
        current_path: "/clients".to_string(),
        heading: "Edit Client".to_string(),
        action: format!("/clients/{id}"),
        name: client.name,
        last_name: client.last_name,
        email: client.email.unwrap_or_default(),
        phone: client.phone.unwrap_or_default(),
        address: client.address.unwrap_or_default(),
        error: query.error.as_deref().map(error_message),
    }
    .into_response())
}

/// `POST /clients/{id}` - Update a client.
#[instrument(skip(state, user, form))]
pub async fn update(
    State(state): State<AppState>,
    RequireSession(user): RequireSession,
    Path(id): Path<ClientId>,
    Form(form): Form<ClientForm>,
) -> Redirect {
    let payload = match build_payload(form) {
        Ok(payload) => payload,
        Err(code) => return Redirect::to(&format!("/clients/{id}/edit?error={code}")),
    };

    match state.api().update_client(&user.token(), id, &payload).await {
        Ok(_) => Redirect::to("/clients?success=updated"),
        Err(ApiError::Unauthorized) => Redirect::to("/logout?error=session_expired"),
        Err(ApiError::NotFound) => Redirect::to("/clients?error=not_found"),
        Err(err) => {
            tracing::error!(error = %err, client_id = %id, "Failed to update client");
            Redirect::to(&format!("/clients/{id}/edit?error=unavailable"))
        }
    }
}

/// `POST /clients/{id}/delete` - Delete a client.
#[instrument(skip(state, user))]
pub async fn delete(
    State(state): State<AppState>,
    RequireSession(user): RequireSession,
    Path(id): Path<ClientId>,
) -> Redirect {
    match state.api().delete_client(&user.token(), id).await {
        Ok(()) => {
            tracing::info!(client_id = %id, "Client deleted");
            Redirect::to("/clients?success=deleted")
        }
        Err(ApiError::Unauthorized) => Redirect::to("/logout?error=session_expired"),
        Err(ApiError::NotFound) => Redirect::to("/clients?error=not_found"),
        Err(err) => {
            tracing::error!(error = %err, client_id = %id, "Failed to delete client");
            Redirect::to("/clients?error=unavailable")
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn form(name: &str, last_name: &str, email: &str) -> ClientForm {
        ClientForm {
            name: name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
            phone: String::new(),
            address: String::new(),
        }
    }

    #[test]
    fn payload_requires_name_and_last_name() {
        assert_eq!(build_payload(form("", "Soto", "")).unwrap_err(), "name_required");
        assert_eq!(build_payload(form("Carla", "  ", "")).unwrap_err(), "name_required");
    }

    #[test]
    fn payload_rejects_malformed_email() {
        assert_eq!(
            build_payload(form("Carla", "Soto", "not-an-email")).unwrap_err(),
            "invalid_email"
        );
    }

    #[test]
    fn payload_maps_blank_optionals_to_none() {
        let payload = build_payload(ClientForm {
            name: " Carla ".to_string(),
            last_name: "Soto".to_string(),
            email: String::new(),
            phone: "  ".to_string(),
            address: "Av. Siempre Viva 123".to_string(),
        })
        .unwrap();

        assert_eq!(payload.name, "Carla");
        assert_eq!(payload.email, None);
        assert_eq!(payload.phone, None);
        assert_eq!(payload.address.as_deref(), Some("Av. Siempre Viva 123"));
    }

    #[test]
    fn client_view_uses_placeholders() {
        let client = Client {
            id: "c56a4180-65aa-42ec-a945-5fd21dec0538".parse().unwrap(),
            name: "Carla".to_string(),
            last_name: "Soto".to_string(),
            email: None,
            phone: None,
            address: None,
            created_at: chrono::NaiveDate::from_ymd_opt(2026, 8, 20)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
        };

        let view = ClientView::from(client);
        assert_eq!(view.name, "Carla Soto");
        assert_eq!(view.email, "-");
        assert_eq!(view.phone, "-");
        assert_eq!(view.joined, "Aug 20, 2026");
    }
}
