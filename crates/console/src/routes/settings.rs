//! Business settings routes.
//!
//! One form over the API's business configuration: name, invoice contact
//! email, base currency, and the logo printed on invoice PDFs.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Form, Query, State},
    response::Redirect,
};
use serde::Deserialize;
use shopdesk_core::{Currency, Email};
use tracing::instrument;
use url::Url;

use crate::api::{ApiError, BusinessConfig};
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireSession;
use crate::state::AppState;

use super::auth::MessageQuery;

// ============================================================================
// Form Types
// ============================================================================

/// Settings form data.
#[derive(Debug, Deserialize)]
pub struct SettingsForm {
    pub business_name: String,
    #[serde(default)]
    pub contact_email: String,
    pub base_currency: String,
    #[serde(default)]
    pub logo_url: String,
}

// ============================================================================
// Templates
// ============================================================================

/// Settings page template.
#[derive(Template, WebTemplate)]
#[template(path = "settings.html")]
pub struct SettingsTemplate {
    pub current_path: String,
    pub business_name: String,
    pub contact_email: String,
    pub base_currency: Currency,
    pub currencies: Vec<Currency>,
    pub logo_url: String,
    pub error: Option<String>,
    pub success: Option<String>,
}

// ============================================================================
// Type Conversions
// ============================================================================

/// Trim a form field, mapping the empty string to `None`.
fn optional(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Validate form input into the API payload, or return a banner code.
fn build_config(form: SettingsForm) -> std::result::Result<BusinessConfig, &'static str> {
    let business_name = form.business_name.trim().to_string();
    if business_name.is_empty() {
        return Err("name_required");
    }

    let Ok(base_currency) = form.base_currency.parse::<Currency>() else {
        return Err("bad_currency");
    };

    let contact_email = match optional(form.contact_email) {
        Some(raw) => match raw.parse::<Email>() {
            Ok(email) => Some(email.to_string()),
            Err(_) => return Err("invalid_email"),
        },
        None => None,
    };

    let logo_url = match optional(form.logo_url) {
        Some(raw) => match Url::parse(&raw) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Some(raw),
            _ => return Err("invalid_logo_url"),
        },
        None => None,
    };

    Ok(BusinessConfig {
        business_name,
        logo_url,
        base_currency,
        contact_email,
    })
}

/// Map a settings banner error code to a user-facing message.
fn error_message(code: &str) -> String {
    match code {
        "name_required" => "Business name is required.".to_string(),
        "invalid_email" => "Enter a valid contact email or leave it blank.".to_string(),
        "invalid_logo_url" => "The logo URL must be a valid http(s) address.".to_string(),
        "bad_currency" => "Choose one of the supported currencies.".to_string(),
        "save_failed" => "Error saving settings.".to_string(),
        _ => "Something went wrong. Please try again.".to_string(),
    }
}

/// Map a settings banner success code to a user-facing message.
fn success_message(code: &str) -> String {
    match code {
        "saved" => "Settings saved successfully.".to_string(),
        _ => "Done.".to_string(),
    }
}

// ============================================================================
// Routes
// ============================================================================

/// `GET /settings` - Business settings form.
#[instrument(skip(state, user))]
pub async fn show(
    State(state): State<AppState>,
    RequireSession(user): RequireSession,
    Query(query): Query<MessageQuery>,
) -> Result<SettingsTemplate> {
    let config = state.api().get_settings(&user.token()).await?;

    Ok(SettingsTemplate {
        current_path: "/settings".to_string(),
        business_name: config.business_name,
        contact_email: config.contact_email.unwrap_or_default(),
        base_currency: config.base_currency,
        currencies: Currency::variants().to_vec(),
        logo_url: config.logo_url.unwrap_or_default(),
        error: query.error.as_deref().map(error_message),
        success: query.success.as_deref().map(success_message),
    })
}

/// `POST /settings` - Save the business settings.
#[instrument(skip(state, user, form))]
pub async fn update(
    State(state): State<AppState>,
    RequireSession(user): RequireSession,
    Form(form): Form<SettingsForm>,
) -> Redirect {
    let config = match build_config(form) {
        Ok(config) => config,
        Err(code) => return Redirect::to(&format!("/settings?error={code}")),
    };

    match state.api().update_settings(&user.token(), &config).await {
        Ok(_) => {
            tracing::info!(currency = %config.base_currency, "Business settings saved");
            Redirect::to("/settings?success=saved")
        }
        Err(ApiError::Unauthorized) => Redirect::to("/logout?error=session_expired"),
        Err(err) => {
            tracing::error!(error = %err, "Failed to save business settings");
            Redirect::to("/settings?error=save_failed")
        }
    }
}
