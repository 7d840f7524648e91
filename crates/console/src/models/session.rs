//! Session-related types.
//!
//! Types stored in the session for authentication state.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use shopdesk_core::{Email, UserId};

use crate::api::auth::is_token_expired;

/// Session-stored user identity and API credentials.
///
/// The bearer token never reaches the browser; it lives in the
/// `PostgreSQL`-backed session and is attached server-side to every
/// remote API call made on the user's behalf.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// User ID from the token's `sub` claim.
    pub id: UserId,
    /// Email the user signed in with.
    pub email: Email,
    /// Bearer token for the remote ShopDesk API.
    pub access_token: String,
    /// Unix timestamp when the token expires.
    pub token_expires_at: i64,
}

impl CurrentUser {
    /// The bearer token wrapped for API calls.
    #[must_use]
    pub fn token(&self) -> SecretString {
        SecretString::from(self.access_token.clone())
    }

    /// Whether the stored token should no longer be used.
    #[must_use]
    pub fn token_is_expired(&self) -> bool {
        is_token_expired(self.token_expires_at)
    }
}

/// Session keys for authentication data.
pub mod keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";
}
