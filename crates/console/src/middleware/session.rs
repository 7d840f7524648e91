//! Postgres-backed login sessions.
//!
//! One session row per signed-in operator; the cookie carries only the
//! session id. The backing table is created by `shopdesk-cli migrate`.

use sqlx::PgPool;
use tower_sessions::{Expiry, SessionManagerLayer, cookie::{SameSite, time::Duration}};
use tower_sessions_sqlx_store::PostgresStore;

use crate::config::ConsoleConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "shopdesk_session";

/// Sessions idle out after a week. The API token stored inside usually
/// expires sooner and forces a fresh login on its own.
const SESSION_IDLE_DAYS: i64 = 7;

/// Build the session layer over the shared connection pool.
///
/// Cookies are `HttpOnly` and `SameSite=Lax`. The `Secure` flag follows
/// the configured public URL, so plain-HTTP local development keeps
/// working.
#[must_use]
pub fn create_session_layer(
    pool: &PgPool,
    config: &ConsoleConfig,
) -> SessionManagerLayer<PostgresStore> {
    let store = PostgresStore::new(pool.clone());

    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(Duration::days(SESSION_IDLE_DAYS)))
        .with_secure(config.base_url.starts_with("https://"))
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
