//! API reachability check.
//!
//! The configured base URL carries the `/api/v1` prefix, but the health
//! endpoint lives at the server root, so the path is joined absolutely.
//!
//! # Usage
//!
//! ```bash
//! shopdesk-cli check-api
//! ```
//!
//! # Environment Variables
//!
//! - `SHOPDESK_API_URL` - Base URL of the ShopDesk API
//!   (e.g. `http://localhost:8000/api/v1`)

use std::time::Duration;

use thiserror::Error;
use url::Url;

const HEALTH_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors from the check-api command.
#[derive(Debug, Error)]
pub enum CheckApiError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Invalid SHOPDESK_API_URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API answered with status {0}")]
    Unhealthy(u16),
}

/// Ping the API health endpoint and report the outcome.
///
/// # Errors
///
/// Returns [`CheckApiError`] if the base URL is missing or malformed,
/// the request fails, or the API answers with a non-success status.
pub async fn run() -> Result<(), CheckApiError> {
    dotenvy::dotenv().ok();

    let base = std::env::var("SHOPDESK_API_URL")
        .map_err(|_| CheckApiError::MissingEnvVar("SHOPDESK_API_URL"))?;
    let health_url = Url::parse(&base)?.join("/health")?;

    tracing::info!(url = %health_url, "Checking API health...");
    let client = reqwest::Client::builder()
        .timeout(HEALTH_TIMEOUT)
        .build()?;

    let response = client.get(health_url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(CheckApiError::Unhealthy(status.as_u16()));
    }

    let body = response.text().await.unwrap_or_default();
    tracing::info!(status = status.as_u16(), body = %body.trim(), "API is healthy");
    Ok(())
}
