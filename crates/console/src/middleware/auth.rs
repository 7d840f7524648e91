//! Authentication middleware and extractors.
//!
//! Provides the extractor that gates every page behind a signed-in
//! session with a usable API token.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::models::{CurrentUser, session_keys};

/// Extractor that requires a signed-in user with a non-expired API token.
///
/// Unknown or logged-out visitors are redirected to the login page. A
/// session whose token has expired is destroyed on the spot so the next
/// request starts clean, and the user lands on login with a banner
/// explaining why.
///
/// # Example
///
/// ```rust,ignore
/// async fn orders_page(
///     RequireSession(user): RequireSession,
/// ) -> impl IntoResponse {
///     format!("Signed in as {}", user.email)
/// }
/// ```
pub struct RequireSession(pub CurrentUser);

/// Error returned when a request cannot be served without signing in.
pub enum AuthRejection {
    /// No session: redirect to the login page.
    RedirectToLogin,
    /// Session existed but the API token expired.
    SessionExpired,
    /// Session layer missing entirely (misconfigured router).
    Unauthorized,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to("/login").into_response(),
            Self::SessionExpired => {
                Redirect::to("/login?error=session_expired").into_response()
            }
            Self::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
        }
    }
}

impl<S> FromRequestParts<S> for RequireSession
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(AuthRejection::Unauthorized)?;

        let user: CurrentUser = session
            .get(session_keys::CURRENT_USER)
            .await
            .ok()
            .flatten()
            .ok_or(AuthRejection::RedirectToLogin)?;

        if user.token_is_expired() {
            // Stale credentials are useless; drop the session record now
            let _ = session.flush().await;
            return Err(AuthRejection::SessionExpired);
        }

        Ok(Self(user))
    }
}

/// Helper to set the current user in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_user(
    session: &Session,
    user: &CurrentUser,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CURRENT_USER, user).await
}

/// Helper to clear the current user from the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_user(
    session: &Session,
) -> Result<(), tower_sessions::session::Error> {
    session.remove::<CurrentUser>(session_keys::CURRENT_USER).await?;
    Ok(())
}
