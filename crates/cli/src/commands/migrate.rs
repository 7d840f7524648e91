//! Session store setup command.
//!
//! The console keeps no business tables of its own; all of that lives
//! behind the ShopDesk API. The only schema the console needs is the
//! session table this command creates.
//!
//! # Usage
//!
//! ```bash
//! shopdesk-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `CONSOLE_DATABASE_URL` (fallback: `DATABASE_URL`) - `PostgreSQL`
//!   connection string for the session store

use secrecy::{ExposeSecret, SecretString};
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;
use tower_sessions_sqlx_store::PostgresStore;

/// Errors from the migrate command.
#[derive(Debug, Error)]
pub enum MigrateError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Create the session store schema.
///
/// Idempotent; safe to run on every deploy.
///
/// # Errors
///
/// Returns [`MigrateError`] if the database URL is missing or the
/// connection or schema creation fails.
pub async fn run() -> Result<(), MigrateError> {
    dotenvy::dotenv().ok();

    let database_url = database_url()?;

    tracing::info!("Connecting to session database...");
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(database_url.expose_secret())
        .await?;

    tracing::info!("Creating session store schema...");
    PostgresStore::new(pool).migrate().await?;

    tracing::info!("Session store ready");
    Ok(())
}

fn database_url() -> Result<SecretString, MigrateError> {
    std::env::var("CONSOLE_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| MigrateError::MissingEnvVar("CONSOLE_DATABASE_URL"))
}
