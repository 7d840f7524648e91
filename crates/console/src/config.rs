//! Console configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `CONSOLE_DATABASE_URL` - `PostgreSQL` connection string (session store)
//! - `CONSOLE_BASE_URL` - Public URL for the console
//! - `CONSOLE_SESSION_SECRET` - Session secret (min 32 chars, high entropy)
//! - `SHOPDESK_API_URL` - Base URL of the remote ShopDesk API
//!
//! ## Optional
//! - `CONSOLE_HOST` - Bind address (default: 127.0.0.1)
//! - `CONSOLE_PORT` - Listen port (default: 3000)
//! - `SHOPDESK_API_TIMEOUT_SECS` - Remote API request timeout (default: 30)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag (default: development)

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const MIN_SESSION_SECRET_LENGTH: usize = 32;
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Substrings that mark a secret as copied from documentation rather than
/// generated. Matched case-insensitively.
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "changeme",
    "change-me",
    "placeholder",
    "example",
    "sample",
    "secret",
    "password",
    "your-",
    "put-your",
    "add-your",
    "insert",
    "fixme",
    "todo",
    "xxx",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Console application configuration.
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// `PostgreSQL` connection URL for the session store (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the console
    pub base_url: String,
    /// Session secret, validated at startup so weak values fail fast
    pub session_secret: SecretString,
    /// Remote ShopDesk API configuration
    pub api: ApiConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag
    pub environment: String,
}

/// Remote ShopDesk API configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// API base URL without a trailing slash, e.g. `https://api.example.com/api/v1`
    pub base_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl ConsoleConfig {
    /// Load configuration from environment variables, reading a `.env` file
    /// first when one exists.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a required variable is absent, a value
    /// does not parse, or the session secret fails the quality gate.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let database_url = database_url_from_env("CONSOLE_DATABASE_URL")?;
        let host = env_or("CONSOLE_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("CONSOLE_HOST".to_string(), e.to_string()))?;
        let port = env_or("CONSOLE_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("CONSOLE_PORT".to_string(), e.to_string()))?;
        let base_url = require_env("CONSOLE_BASE_URL")?;
        let session_secret = session_secret_from_env("CONSOLE_SESSION_SECRET")?;

        let api = ApiConfig::from_env()?;
        let sentry_dsn = std::env::var("SENTRY_DSN").ok();
        let environment = env_or("SENTRY_ENVIRONMENT", "development");

        Ok(Self {
            database_url,
            host,
            port,
            base_url,
            session_secret,
            api,
            sentry_dsn,
            environment,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl ApiConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let raw = require_env("SHOPDESK_API_URL")?;
        let base_url = parse_api_url(&raw)?;
        let timeout_secs = env_or("SHOPDESK_API_TIMEOUT_SECS", "30")
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("SHOPDESK_API_TIMEOUT_SECS".to_string(), e.to_string())
            })?;

        Ok(Self {
            base_url,
            timeout_secs,
        })
    }
}

/// Validate the API URL and normalize away any trailing slash so route
/// paths can always be appended as `{base}/orders/`.
fn parse_api_url(raw: &str) -> Result<String, ConfigError> {
    let url = Url::parse(raw)
        .map_err(|e| ConfigError::InvalidEnvVar("SHOPDESK_API_URL".to_string(), e.to_string()))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidEnvVar(
            "SHOPDESK_API_URL".to_string(),
            format!("unsupported scheme: {}", url.scheme()),
        ));
    }
    Ok(raw.trim_end_matches('/').to_string())
}

// =============================================================================
// Environment helpers
// =============================================================================

fn require_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Session-store URL, falling back to the generic `DATABASE_URL` that
/// platforms like Fly.io inject when attaching Postgres.
fn database_url_from_env(primary_key: &str) -> Result<SecretString, ConfigError> {
    std::env::var(primary_key)
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Load the session secret, refusing values that would weaken every cookie
/// the console issues.
fn session_secret_from_env(key: &str) -> Result<SecretString, ConfigError> {
    let value = require_env(key)?;
    check_secret_quality(&value, key)?;
    Ok(SecretString::from(value))
}

/// The quality gate: minimum length, no placeholder substrings, and enough
/// entropy that the value was plausibly generated rather than typed.
fn check_secret_quality(value: &str, key: &str) -> Result<(), ConfigError> {
    if value.len() < MIN_SESSION_SECRET_LENGTH {
        return Err(ConfigError::InsecureSecret(
            key.to_string(),
            format!(
                "needs {MIN_SESSION_SECRET_LENGTH}+ characters, got {}",
                value.len()
            ),
        ));
    }

    let lower = value.to_lowercase();
    if let Some(pattern) = PLACEHOLDER_PATTERNS.iter().find(|p| lower.contains(**p)) {
        return Err(ConfigError::InsecureSecret(
            key.to_string(),
            format!("looks like a placeholder ('{pattern}')"),
        ));
    }

    let entropy = shannon_entropy(value);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            key.to_string(),
            format!(
                "only {entropy:.2} bits/char of entropy, minimum is {MIN_ENTROPY_BITS_PER_CHAR:.1}; generate a random value"
            ),
        ));
    }

    Ok(())
}

/// Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    let total = s.chars().count();
    if total == 0 {
        return 0.0;
    }

    let mut counts: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *counts.entry(c).or_default() += 1;
    }

    #[allow(clippy::cast_precision_loss)] // secrets are far below f64 precision limits
    let total = total as f64;
    counts.values().fold(0.0, |acc, &n| {
        #[allow(clippy::cast_precision_loss)]
        let p = n as f64 / total;
        acc - p * p.log2()
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_entropy_of_empty_is_zero() {
        assert!(shannon_entropy("").abs() < f64::EPSILON);
    }

    #[test]
    fn test_entropy_of_repeated_char_is_zero() {
        assert!(shannon_entropy("zzzzzzzz").abs() < f64::EPSILON);
    }

    #[test]
    fn test_entropy_of_even_two_char_split_is_one_bit() {
        assert!((shannon_entropy("abab") - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_entropy_of_generated_value_clears_threshold() {
        assert!(shannon_entropy("Kq7#wP2$vN8@dR4!") > MIN_ENTROPY_BITS_PER_CHAR);
    }

    #[test]
    fn test_secret_quality_rejects_short_values() {
        let err = check_secret_quality("short", "TEST_KEY").unwrap_err();
        assert!(matches!(err, ConfigError::InsecureSecret(_, _)));
    }

    #[test]
    fn test_secret_quality_rejects_placeholders() {
        assert!(check_secret_quality("your-session-secret-goes-here-now", "TEST_KEY").is_err());
        assert!(check_secret_quality("changeme-0123456789-0123456789-01", "TEST_KEY").is_err());
    }

    #[test]
    fn test_secret_quality_rejects_low_entropy() {
        let err = check_secret_quality(&"b".repeat(40), "TEST_KEY").unwrap_err();
        assert!(matches!(err, ConfigError::InsecureSecret(_, _)));
    }

    #[test]
    fn test_secret_quality_accepts_generated_value() {
        assert!(check_secret_quality("Nq3!xV7@pB1#mJ9$tZ5%wD8^kF2&hS6g", "TEST_KEY").is_ok());
    }

    #[test]
    fn test_parse_api_url_trims_trailing_slash() {
        let base = parse_api_url("https://api.example.com/api/v1/").unwrap();
        assert_eq!(base, "https://api.example.com/api/v1");
    }

    #[test]
    fn test_parse_api_url_rejects_bad_scheme() {
        assert!(parse_api_url("ftp://api.example.com").is_err());
        assert!(parse_api_url("not a url").is_err());
    }

    #[test]
    fn test_socket_addr_joins_host_and_port() {
        let config = ConsoleConfig {
            database_url: SecretString::from("postgres://localhost/console"),
            host: "10.0.0.7".parse().unwrap(),
            port: 4500,
            base_url: "http://localhost:4500".to_string(),
            session_secret: SecretString::from("w".repeat(32)),
            api: ApiConfig {
                base_url: "http://localhost:8000/api/v1".to_string(),
                timeout_secs: 30,
            },
            sentry_dsn: None,
            environment: "development".to_string(),
        };

        assert_eq!(config.socket_addr().to_string(), "10.0.0.7:4500");
    }
}
