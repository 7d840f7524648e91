//! Postgres pool for the console's session store.
//!
//! The console keeps no business tables of its own. Clients, orders, and
//! settings all live behind the ShopDesk API; the only local schema is the
//! `tower_sessions.session` table, created once by:
//!
//! ```bash
//! cargo run -p shopdesk-cli -- migrate
//! ```

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

/// Open the session-store connection pool.
///
/// # Errors
///
/// Returns `sqlx::Error` when Postgres is unreachable or rejects the
/// credentials in `database_url`.
pub async fn create_pool(database_url: &SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
