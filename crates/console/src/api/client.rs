//! HTTP plumbing for the ShopDesk API.
//!
//! All request/response handling lives here: URL building, bearer
//! authentication, status normalization, and JSON decoding. Domain methods
//! in the sibling modules are thin wrappers over these primitives.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use serde::{Serialize, de::DeserializeOwned};

use super::ApiError;

use crate::config::ApiConfig;

/// ShopDesk API client.
///
/// Cheap to clone; the underlying `reqwest::Client` and its connection
/// pool are shared. Tokens are not cached here: each method takes the
/// calling user's bearer token from their session.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    http: reqwest::Client,
    /// Base URL without a trailing slash, e.g. `https://api.example.com/api/v1`
    base_url: String,
}

impl ApiClient {
    /// Create a new API client from configuration.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be created. This should never happen
    /// under normal circumstances as we use standard TLS configuration.
    #[must_use]
    pub fn new(config: &ApiConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            inner: Arc::new(ApiClientInner {
                http,
                base_url: config.base_url.clone(),
            }),
        }
    }

    /// The underlying HTTP client, for requests outside the bearer-token
    /// flow (login, health probes).
    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.inner.http
    }

    /// Build a full URL from an API path like `/orders/`.
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{path}", self.inner.base_url)
    }

    // =========================================================================
    // Request primitives
    // =========================================================================

    /// `GET` a JSON resource.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        token: &SecretString,
        path: &str,
    ) -> Result<T, ApiError> {
        let response = self
            .inner
            .http
            .get(self.url(path))
            .bearer_auth(token.expose_secret())
            .send()
            .await?;
        parse_json(response).await
    }

    /// `POST` a JSON body and decode the JSON response.
    pub(crate) async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        token: &SecretString,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .inner
            .http
            .post(self.url(path))
            .bearer_auth(token.expose_secret())
            .json(body)
            .send()
            .await?;
        parse_json(response).await
    }

    /// `PUT` a JSON body and decode the JSON response.
    pub(crate) async fn put_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        token: &SecretString,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .inner
            .http
            .put(self.url(path))
            .bearer_auth(token.expose_secret())
            .json(body)
            .send()
            .await?;
        parse_json(response).await
    }

    /// `PATCH` a JSON body and decode the JSON response.
    pub(crate) async fn patch_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        token: &SecretString,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .inner
            .http
            .patch(self.url(path))
            .bearer_auth(token.expose_secret())
            .json(body)
            .send()
            .await?;
        parse_json(response).await
    }

    /// `DELETE` a resource. The API answers 204 with no body.
    pub(crate) async fn delete(&self, token: &SecretString, path: &str) -> Result<(), ApiError> {
        let response = self
            .inner
            .http
            .delete(self.url(path))
            .bearer_auth(token.expose_secret())
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }

    /// `GET` a binary resource (invoice PDFs).
    pub(crate) async fn get_bytes(
        &self,
        token: &SecretString,
        path: &str,
    ) -> Result<Vec<u8>, ApiError> {
        let response = self
            .inner
            .http
            .get(self.url(path))
            .bearer_auth(token.expose_secret())
            .send()
            .await?;
        let response = check_status(response).await?;
        Ok(response.bytes().await?.to_vec())
    }
}

/// Normalize error statuses, then decode the body as JSON.
pub(crate) async fn parse_json<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ApiError> {
    let response = check_status(response).await?;
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| ApiError::InvalidResponse(e.to_string()))
}

/// Map non-success statuses onto [`ApiError`] variants.
///
/// Consumes the response on the error path so the detail message can be
/// read from the body.
pub(crate) async fn check_status(
    response: reqwest::Response,
) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if status == reqwest::StatusCode::UNAUTHORIZED {
        return Err(ApiError::Unauthorized);
    }

    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(ApiError::NotFound);
    }

    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        let retry_after = response
            .headers()
            .get("Retry-After")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse().ok())
            .unwrap_or(60);
        return Err(ApiError::RateLimited { retry_after });
    }

    let body = response.text().await.unwrap_or_default();
    Err(ApiError::Api {
        status: status.as_u16(),
        message: error_detail(status, &body),
    })
}

/// Extract the `detail` field the API puts in error bodies.
///
/// Validation errors carry a structured `detail` array; anything
/// non-string is serialized compactly. Falls back to the status reason
/// when the body is not JSON.
fn error_detail(status: reqwest::StatusCode, body: &str) -> String {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        detail: serde_json::Value,
    }

    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            detail: serde_json::Value::String(message),
        }) => message,
        Ok(ErrorBody { detail }) => detail.to_string(),
        Err(_) => status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> ApiClient {
        ApiClient::new(&ApiConfig {
            base_url: "http://localhost:8000/api/v1".to_string(),
            timeout_secs: 30,
        })
    }

    #[test]
    fn test_url_building() {
        let client = test_client();
        assert_eq!(
            client.url("/orders/"),
            "http://localhost:8000/api/v1/orders/"
        );
        assert_eq!(
            client.url("/dashboard/metrics"),
            "http://localhost:8000/api/v1/dashboard/metrics"
        );
    }

    #[test]
    fn test_error_detail_string() {
        let body = r#"{"detail": "Incorrect email or password"}"#;
        assert_eq!(
            error_detail(reqwest::StatusCode::BAD_REQUEST, body),
            "Incorrect email or password"
        );
    }

    #[test]
    fn test_error_detail_structured() {
        let body = r#"{"detail": [{"loc": ["body", "name"], "msg": "field required"}]}"#;
        let detail = error_detail(reqwest::StatusCode::UNPROCESSABLE_ENTITY, body);
        assert!(detail.contains("field required"));
    }

    #[test]
    fn test_error_detail_non_json_falls_back_to_reason() {
        assert_eq!(
            error_detail(reqwest::StatusCode::BAD_GATEWAY, "<html>nginx</html>"),
            "Bad Gateway"
        );
    }
}
