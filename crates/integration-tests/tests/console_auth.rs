//! Integration tests for console sign-in and sign-out.
//!
//! These tests require:
//! - A running `PostgreSQL` session store (shopdesk-cli migrate)
//! - The console running (cargo run -p shopdesk-console)
//! - A reachable ShopDesk API for the credential tests
//!
//! Run with: cargo test -p shopdesk-integration-tests -- --ignored

use reqwest::StatusCode;
use shopdesk_integration_tests::{client, console_base_url, location, no_redirect_client, sign_in};

// ============================================================================
// Route Guard Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running console"]
async fn test_anonymous_visitors_are_sent_to_login() {
    let client = no_redirect_client();
    let base_url = console_base_url();

    for path in ["/", "/clients", "/clients/new", "/orders", "/orders/new", "/settings"] {
        let resp = client
            .get(format!("{base_url}{path}"))
            .send()
            .await
            .expect("Failed to request protected page");

        assert_eq!(resp.status(), StatusCode::SEE_OTHER, "path: {path}");
        assert_eq!(location(&resp), "/login", "path: {path}");
    }
}

#[tokio::test]
#[ignore = "Requires running console"]
async fn test_unknown_paths_redirect_to_dashboard() {
    let client = no_redirect_client();
    let base_url = console_base_url();

    let resp = client
        .get(format!("{base_url}/definitely-not-a-page"))
        .send()
        .await
        .expect("Failed to request unknown path");

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/");
}

// ============================================================================
// Login Page Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running console"]
async fn test_login_page_renders() {
    let client = client();
    let base_url = console_base_url();

    let resp = client
        .get(format!("{base_url}/login"))
        .send()
        .await
        .expect("Failed to get login page");

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("Welcome Back"));
    assert!(body.contains("Sign in to your ShopDesk account"));
}

#[tokio::test]
#[ignore = "Requires running console"]
async fn test_login_page_translates_banner_codes() {
    let client = client();
    let base_url = console_base_url();

    let resp = client
        .get(format!("{base_url}/login?error=session_expired"))
        .send()
        .await
        .expect("Failed to get login page with error code");
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("Your session has expired"));

    let resp = client
        .get(format!("{base_url}/login?success=signed_out"))
        .send()
        .await
        .expect("Failed to get login page with success code");
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("You have been signed out"));
}

// ============================================================================
// Credential Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running console and ShopDesk API"]
async fn test_login_rejects_bad_credentials() {
    let client = client();
    let base_url = console_base_url();

    let resp = client
        .post(format!("{base_url}/login"))
        .form(&[
            ("email", "nobody@example.com"),
            ("password", "wrong-password"),
        ])
        .send()
        .await
        .expect("Failed to submit login form");

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.url().path(), "/login");
    assert_eq!(resp.url().query(), Some("error=credentials"));

    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("Invalid email or password"));
}

#[tokio::test]
#[ignore = "Requires running console"]
async fn test_login_rejects_malformed_email() {
    // Rejected locally, before the API is ever called
    let client = client();
    let base_url = console_base_url();

    let resp = client
        .post(format!("{base_url}/login"))
        .form(&[("email", "not-an-email"), ("password", "whatever")])
        .send()
        .await
        .expect("Failed to submit login form");

    assert_eq!(resp.url().path(), "/login");
    assert_eq!(resp.url().query(), Some("error=credentials"));
}

// ============================================================================
// Session Lifecycle Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running console, ShopDesk API, and test credentials"]
async fn test_sign_in_and_sign_out_lifecycle() {
    let client = client();
    if !sign_in(&client).await {
        return; // No test credentials configured
    }
    let base_url = console_base_url();

    // Signed in: the dashboard renders
    let resp = client
        .get(format!("{base_url}/"))
        .send()
        .await
        .expect("Failed to get dashboard");
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("Dashboard Overview"));

    // Sign out
    let resp = client
        .post(format!("{base_url}/logout"))
        .send()
        .await
        .expect("Failed to submit logout");
    assert_eq!(resp.url().path(), "/login");
    assert_eq!(resp.url().query(), Some("success=signed_out"));

    // Session is gone: the guard kicks in again
    let resp = client
        .get(format!("{base_url}/"))
        .send()
        .await
        .expect("Failed to get dashboard after logout");
    assert_eq!(resp.url().path(), "/login");
}

#[tokio::test]
#[ignore = "Requires running console"]
async fn test_expired_session_chain_lands_on_login() {
    // /logout is GET-able so expired-session redirects can chain through
    // it; the banner code survives the hop.
    let client = client();
    let base_url = console_base_url();

    let resp = client
        .get(format!("{base_url}/logout?error=session_expired"))
        .send()
        .await
        .expect("Failed to follow logout chain");

    assert_eq!(resp.url().path(), "/login");
    assert_eq!(resp.url().query(), Some("error=session_expired"));
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("Your session has expired"));
}
