//! Authentication against the ShopDesk API.
//!
//! Exchanges email/password for a JWT bearer token. The API signs and
//! verifies tokens; the console only reads the payload claims to learn
//! the user ID and expiry, so no signature check happens here.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use shopdesk_core::UserId;
use tracing::instrument;

use super::ApiError;
use super::client::{ApiClient, check_status};

/// Login endpoint path (OAuth2 password flow, form-encoded).
const LOGIN_PATH: &str = "/auth/login/access-token";

/// Tokens within this many seconds of expiry are treated as expired, so a
/// request never leaves with a token that dies in flight.
pub const TOKEN_EXPIRY_BUFFER_SECS: i64 = 60;

/// Claims the console reads from the JWT payload.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenClaims {
    /// Subject: the user's ID.
    pub sub: String,
    /// Unix timestamp when the token expires.
    pub exp: i64,
}

/// A successful login: the bearer token plus what its claims tell us.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// User ID from the token's `sub` claim.
    pub user_id: UserId,
    /// Raw bearer token for subsequent API calls.
    pub access_token: String,
    /// Unix timestamp when the token expires, from the `exp` claim.
    pub expires_at: i64,
}

/// Response from the login endpoint.
#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Authenticate with the ShopDesk API using email and password.
///
/// # Errors
///
/// Returns `ApiError::Api` with status 400 when credentials are rejected,
/// `ApiError::InvalidResponse` when the returned token cannot be decoded,
/// or `ApiError::Http` on transport failures.
#[instrument(skip(client, password), fields(email = %email))]
pub async fn login(
    client: &ApiClient,
    email: &str,
    password: &SecretString,
) -> Result<AuthenticatedUser, ApiError> {
    let response = client
        .http()
        .post(client.url(LOGIN_PATH))
        .form(&[("username", email), ("password", password.expose_secret())])
        .send()
        .await?;

    let response = check_status(response).await?;
    let token_response: TokenResponse = response
        .json()
        .await
        .map_err(|e| ApiError::InvalidResponse(e.to_string()))?;

    let claims = decode_claims(&token_response.access_token)?;
    let user_id: UserId = claims
        .sub
        .parse()
        .map_err(|_| ApiError::InvalidResponse(format!("sub claim is not a UUID: {}", claims.sub)))?;

    Ok(AuthenticatedUser {
        user_id,
        access_token: token_response.access_token,
        expires_at: claims.exp,
    })
}

/// Decode the payload segment of a JWT without verifying the signature.
///
/// # Errors
///
/// Returns `ApiError::InvalidResponse` if the token has no payload
/// segment, the segment is not base64url, or the JSON lacks the expected
/// claims.
pub fn decode_claims(access_token: &str) -> Result<TokenClaims, ApiError> {
    let payload = access_token
        .split('.')
        .nth(1)
        .ok_or_else(|| ApiError::InvalidResponse("JWT has no payload segment".to_string()))?;

    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|e| ApiError::InvalidResponse(format!("JWT payload is not base64url: {e}")))?;

    serde_json::from_slice(&bytes)
        .map_err(|e| ApiError::InvalidResponse(format!("JWT payload is not valid JSON: {e}")))
}

/// Whether a token with the given `exp` should no longer be used.
#[must_use]
pub fn is_token_expired(expires_at: i64) -> bool {
    let now = chrono::Utc::now().timestamp();
    now >= expires_at - TOKEN_EXPIRY_BUFFER_SECS
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    /// Build an unsigned JWT with the given payload JSON.
    fn fake_jwt(payload: &serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(serde_json::to_vec(payload).unwrap());
        format!("{header}.{body}.signature")
    }

    #[test]
    fn test_decode_claims_reads_sub_and_exp() {
        let token = fake_jwt(&serde_json::json!({
            "sub": "c56a4180-65aa-42ec-a945-5fd21dec0538",
            "exp": 4_102_444_800_i64,
        }));

        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.sub, "c56a4180-65aa-42ec-a945-5fd21dec0538");
        assert_eq!(claims.exp, 4_102_444_800);
    }

    #[test]
    fn test_decode_claims_rejects_token_without_payload() {
        assert!(decode_claims("justonesegment").is_err());
    }

    #[test]
    fn test_decode_claims_rejects_non_base64_payload() {
        assert!(decode_claims("header.!!not-base64!!.sig").is_err());
    }

    #[test]
    fn test_decode_claims_rejects_missing_claims() {
        let token = fake_jwt(&serde_json::json!({ "sub": "abc" }));
        assert!(decode_claims(&token).is_err());
    }

    #[test]
    fn test_is_token_expired() {
        let now = chrono::Utc::now().timestamp();

        // Expired an hour ago
        assert!(is_token_expired(now - 3600));

        // Expires in an hour
        assert!(!is_token_expired(now + 3600));

        // Expires in 30 seconds (inside the 60s buffer)
        assert!(is_token_expired(now + 30));
    }
}
