//! Integration tests for the ShopDesk console.
//!
//! # Running Tests
//!
//! ```bash
//! # One-time setup: session store schema
//! cargo run -p shopdesk-cli -- migrate
//!
//! # Start the console against a reachable ShopDesk API
//! cargo run -p shopdesk-console
//!
//! # Run the integration tests
//! cargo test -p shopdesk-integration-tests -- --ignored
//! ```
//!
//! # Environment Variables
//!
//! - `CONSOLE_BASE_URL` - Where the console listens (default
//!   `http://localhost:3000`)
//! - `CONSOLE_TEST_EMAIL` / `CONSOLE_TEST_PASSWORD` - Credentials for a
//!   real account on the configured ShopDesk API. Tests that need a
//!   signed-in session skip themselves when these are unset.

use reqwest::Client;

/// Base URL for the console (configurable via environment).
#[must_use]
pub fn console_base_url() -> String {
    std::env::var("CONSOLE_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Cookie-carrying client that follows redirects.
///
/// POST handlers answer with redirect-to-banner, so most flows assert on
/// the final URL after following the chain.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// Cookie-carrying client that surfaces redirects instead of following
/// them, for asserting on status codes and `Location` headers.
#[must_use]
pub fn no_redirect_client() -> Client {
    Client::builder()
        .cookie_store(true)
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("Failed to create HTTP client")
}

/// Sign in with the configured test account.
///
/// Returns `false` when `CONSOLE_TEST_EMAIL` / `CONSOLE_TEST_PASSWORD`
/// are unset so callers can skip instead of failing. Panics if the
/// credentials are set but rejected; that means the test environment is
/// misconfigured.
pub async fn sign_in(client: &Client) -> bool {
    let (Ok(email), Ok(password)) = (
        std::env::var("CONSOLE_TEST_EMAIL"),
        std::env::var("CONSOLE_TEST_PASSWORD"),
    ) else {
        return false;
    };

    let base_url = console_base_url();
    let resp = client
        .post(format!("{base_url}/login"))
        .form(&[("email", email.as_str()), ("password", password.as_str())])
        .send()
        .await
        .expect("Failed to submit login form");

    assert!(
        resp.status().is_success(),
        "Login request failed: {}",
        resp.status()
    );
    assert_eq!(
        resp.url().path(),
        "/",
        "Expected sign-in to land on the dashboard; check CONSOLE_TEST_EMAIL/PASSWORD"
    );
    true
}

/// Pull the `Location` header from a redirect response.
#[must_use]
pub fn location(resp: &reqwest::Response) -> String {
    resp.headers()
        .get("location")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string()
}
