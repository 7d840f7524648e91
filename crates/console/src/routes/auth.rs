//! Sign-in and sign-out routes.
//!
//! Successful sign-in stores a [`CurrentUser`] in the server-side session;
//! every other page is gated on that entry by the `RequireSession`
//! extractor. Sign-out destroys the session record entirely.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Form, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use secrecy::SecretString;
use serde::Deserialize;
use shopdesk_core::Email;
use tower_sessions::Session;

use crate::api::{self, ApiError};
use crate::error::{clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::{clear_current_user, set_current_user};
use crate::models::{CurrentUser, session_keys};
use crate::state::AppState;

// ============================================================================
// Form Types
// ============================================================================

/// Sign-in form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

// ============================================================================
// Query Types
// ============================================================================

/// Banner codes carried through redirects.
#[derive(Debug, Default, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
    pub success: Option<String>,
}

// ============================================================================
// Templates
// ============================================================================

/// Sign-in page template.
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Map a sign-in error code to a user-facing message.
fn error_message(code: &str) -> String {
    match code {
        "credentials" => "Invalid email or password.".to_string(),
        "session_expired" => "Your session has expired. Please sign in again.".to_string(),
        "session" => "Could not start a session. Please try again.".to_string(),
        "unavailable" => {
            "The service is temporarily unavailable. Please try again shortly.".to_string()
        }
        _ => "Something went wrong. Please try again.".to_string(),
    }
}

/// Map a sign-in success code to a user-facing message.
fn success_message(code: &str) -> String {
    match code {
        "signed_out" => "You have been signed out.".to_string(),
        _ => "Done.".to_string(),
    }
}

// ============================================================================
// Sign-in
// ============================================================================

/// `GET /login` - Render the sign-in page.
///
/// A visitor who already holds a live session is sent to the dashboard.
pub async fn login_page(session: Session, Query(query): Query<MessageQuery>) -> Response {
    if let Ok(Some(user)) = session.get::<CurrentUser>(session_keys::CURRENT_USER).await {
        if !user.token_is_expired() {
            return Redirect::to("/").into_response();
        }
    }

    LoginTemplate {
        error: query.error.as_deref().map(error_message),
        success: query.success.as_deref().map(success_message),
    }
    .into_response()
}

/// `POST /login` - Authenticate against the ShopDesk API.
///
/// On success the bearer token and its decoded expiry are stored in the
/// session and the user lands on the dashboard. Credential rejections and
/// transport failures both come back to the sign-in page with a banner
/// code; the page never reveals which field was wrong.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Redirect {
    let Ok(email) = form.email.trim().parse::<Email>() else {
        tracing::warn!("Sign-in attempt with malformed email");
        return Redirect::to("/login?error=credentials");
    };

    let password = SecretString::from(form.password);
    match api::login(state.api(), email.as_str(), &password).await {
        Ok(auth) => {
            let user = CurrentUser {
                id: auth.user_id,
                email,
                access_token: auth.access_token,
                token_expires_at: auth.expires_at,
            };
            if let Err(err) = set_current_user(&session, &user).await {
                tracing::error!(error = %err, "Failed to persist session");
                return Redirect::to("/login?error=session");
            }
            set_sentry_user(&user.id, Some(user.email.as_str()));
            tracing::info!(user_id = %user.id, "User signed in");
            Redirect::to("/")
        }
        Err(ApiError::Unauthorized) => {
            tracing::warn!("Sign-in rejected");
            Redirect::to("/login?error=credentials")
        }
        Err(ApiError::Api { status, .. }) if (400..500).contains(&status) => {
            tracing::warn!(status, "Sign-in rejected");
            Redirect::to("/login?error=credentials")
        }
        Err(err) => {
            tracing::error!(error = %err, "Sign-in request failed");
            Redirect::to("/login?error=unavailable")
        }
    }
}

// ============================================================================
// Sign-out
// ============================================================================

/// `GET|POST /logout` - Destroy the session and return to the sign-in page.
///
/// Expired-session redirects chain through here with `?error=...` so the
/// stale session record is removed before the sign-in page explains what
/// happened.
pub async fn logout(session: Session, Query(query): Query<MessageQuery>) -> Redirect {
    if let Err(err) = clear_current_user(&session).await {
        tracing::warn!(error = %err, "Failed to clear session user");
    }
    if let Err(err) = session.flush().await {
        tracing::warn!(error = %err, "Failed to flush session");
    }
    clear_sentry_user();

    match query.error.as_deref() {
        Some(code) => Redirect::to(&format!("/login?error={}", urlencoding::encode(code))),
        None => Redirect::to("/login?success=signed_out"),
    }
}
