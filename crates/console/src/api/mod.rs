//! ShopDesk REST API client.
//!
//! The console holds no business data of its own. Clients, orders, dashboard
//! metrics, and business settings all live behind the remote ShopDesk API;
//! this module is the only place that talks to it.
//!
//! # Architecture
//!
//! - Bearer-token authentication: email/password → JWT → API
//! - Tokens are per-user and live in the server-side session, so every
//!   method takes the caller's token instead of caching one globally
//! - Plain JSON over `reqwest`; one `ApiClient` (and connection pool) is
//!   shared across all requests via [`crate::state::AppState`]
//!
//! # Errors
//!
//! Remote failures are normalized into [`ApiError`]. A 401 from any
//! endpoint becomes [`ApiError::Unauthorized`], which route handlers turn
//! into a redirect through `/logout` so the stale session is destroyed.

pub mod auth;
pub mod client;
pub mod clients;
pub mod dashboard;
pub mod orders;
pub mod settings;

pub use auth::{AuthenticatedUser, TokenClaims, decode_claims, login};
pub use client::ApiClient;
pub use clients::{Client, ClientPayload};
pub use dashboard::{BestClient, DashboardMetrics};
pub use orders::{NewOrder, NewOrderItem, Order, OrderItem, StatusUpdate};
pub use settings::BusinessConfig;

use thiserror::Error;

/// Errors that can occur when talking to the ShopDesk API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed (network, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API responded with something we could not decode.
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    /// The API rejected our token (401).
    #[error("API token rejected")]
    Unauthorized,

    /// Resource not found (404).
    #[error("Resource not found")]
    NotFound,

    /// Rate limited by the API.
    #[error("Rate limited, retry after {retry_after} seconds")]
    RateLimited {
        /// Seconds to wait before retrying, from the `Retry-After` header.
        retry_after: u64,
    },

    /// The API returned an error status with a detail message.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Detail message extracted from the response body.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = ApiError::Unauthorized;
        assert_eq!(err.to_string(), "API token rejected");

        let err = ApiError::RateLimited { retry_after: 60 };
        assert_eq!(err.to_string(), "Rate limited, retry after 60 seconds");

        let err = ApiError::Api {
            status: 400,
            message: "Incorrect email or password".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "API error (400): Incorrect email or password"
        );
    }
}
