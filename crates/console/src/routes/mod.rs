//! HTTP route handlers for the console.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                      - Dashboard (requires session)
//! GET  /health                - Health check
//! GET  /health/ready          - Readiness check (database)
//!
//! # Auth
//! GET  /login                 - Sign-in page
//! POST /login                 - Sign-in action
//! GET  /logout                - Sign-out (target of expired-session redirects)
//! POST /logout                - Sign-out action
//!
//! # Clients
//! GET  /clients               - Client list
//! GET  /clients/new           - New client form
//! POST /clients               - Create client
//! GET  /clients/{id}/edit     - Edit client form
//! POST /clients/{id}          - Update client
//! POST /clients/{id}/delete   - Delete client
//!
//! # Orders
//! GET  /orders                - Order list
//! GET  /orders/new            - New order form (draft carried in the query string)
//! POST /orders                - Create order
//! POST /orders/{id}/status    - Update order status
//! GET  /orders/{id}/invoice   - Download invoice PDF
//!
//! # Settings
//! GET  /settings              - Business settings form
//! POST /settings              - Save business settings
//! ```
//!
//! Unknown paths redirect to the dashboard rather than rendering a 404
//! page, so stale bookmarks land somewhere useful.

pub mod auth;
pub mod clients;
pub mod dashboard;
pub mod orders;
pub mod settings;

use axum::{
    Router,
    response::Redirect,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        // GET is allowed so that expired-session redirects can chain
        // through /logout without a form post.
        .route("/logout", get(auth::logout).post(auth::logout))
}

/// Create the client routes router.
pub fn client_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(clients::index).post(clients::create))
        .route("/new", get(clients::new_form))
        .route("/{id}", post(clients::update))
        .route("/{id}/edit", get(clients::edit_form))
        .route("/{id}/delete", post(clients::delete))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::index).post(orders::create))
        .route("/new", get(orders::new_form))
        .route("/{id}/status", post(orders::update_status))
        .route("/{id}/invoice", get(orders::invoice))
}

/// Create all routes for the console.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Dashboard
        .route("/", get(dashboard::index))
        // Auth routes
        .merge(auth_routes())
        // Client routes
        .nest("/clients", client_routes())
        // Order routes
        .nest("/orders", order_routes())
        // Business settings
        .route("/settings", get(settings::show).post(settings::update))
}

/// Fallback for unknown paths.
pub async fn fallback() -> Redirect {
    Redirect::to("/")
}
