//! Shared application state.

use std::sync::Arc;

use sqlx::PgPool;

use crate::api::ApiClient;
use crate::config::ConsoleConfig;

/// Everything a handler needs: configuration, the session-store pool, and
/// the ShopDesk API client. Cloning is an `Arc` bump.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ConsoleConfig,
    pool: PgPool,
    api: ApiClient,
}

impl AppState {
    /// Build the state, constructing the API client from `config.api`.
    #[must_use]
    pub fn new(config: ConsoleConfig, pool: PgPool) -> Self {
        let api = ApiClient::new(&config.api);

        Self {
            inner: Arc::new(AppStateInner { config, pool, api }),
        }
    }

    /// Console configuration.
    #[must_use]
    pub fn config(&self) -> &ConsoleConfig {
        &self.inner.config
    }

    /// Session-store connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// ShopDesk API client.
    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }
}
