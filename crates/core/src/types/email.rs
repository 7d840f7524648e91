//! Email address type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Why a string failed [`Email::parse`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum EmailError {
    /// Nothing was entered.
    #[error("email address is empty")]
    Empty,
    /// Longer than the RFC 5321 limit.
    #[error("email address is longer than {max} characters")]
    TooLong {
        /// The limit that was exceeded.
        max: usize,
    },
    /// Spaces, tabs, or line breaks in the address.
    #[error("email address contains whitespace")]
    Whitespace,
    /// No @ anywhere in the input.
    #[error("email address has no @")]
    MissingAt,
    /// The @ is the first character.
    #[error("email address has nothing before the @")]
    LocalPartEmpty,
    /// The @ is the last character.
    #[error("email address has nothing after the @")]
    DomainEmpty,
}

/// An email address.
///
/// Validation is structural only: one @ separating a non-empty local part
/// from a non-empty domain, no whitespace, at most 254 characters
/// (RFC 5321). The remote API performs its own validation; this type
/// exists so obviously broken input never leaves the console.
///
/// ## Examples
///
/// ```
/// use shopdesk_core::Email;
///
/// let email = Email::parse("owner@example.com")?;
/// assert_eq!(email.domain(), "example.com");
///
/// assert!(Email::parse("missing-at.com").is_err());
/// assert!(Email::parse("@shop.co").is_err());
/// assert!(Email::parse("owner@").is_err());
/// # Ok::<(), shopdesk_core::EmailError>(())
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Maximum length of an email address (RFC 5321).
    pub const MAX_LENGTH: usize = 254;

    /// Parse an `Email` from a string.
    ///
    /// # Errors
    ///
    /// Returns an [`EmailError`] naming the first structural rule the
    /// input breaks.
    pub fn parse(s: &str) -> Result<Self, EmailError> {
        if s.is_empty() {
            return Err(EmailError::Empty);
        }
        if s.len() > Self::MAX_LENGTH {
            return Err(EmailError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }
        if s.contains(char::is_whitespace) {
            return Err(EmailError::Whitespace);
        }

        match s.split_once('@') {
            None => Err(EmailError::MissingAt),
            Some(("", _)) => Err(EmailError::LocalPartEmpty),
            Some((_, "")) => Err(EmailError::DomainEmpty),
            Some(_) => Ok(Self(s.to_owned())),
        }
    }

    /// The address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Unwraps into the owned address string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Everything before the @.
    #[must_use]
    pub fn local_part(&self) -> &str {
        self.0.split_once('@').map_or("", |(local, _)| local)
    }

    /// Everything after the @.
    #[must_use]
    pub fn domain(&self) -> &str {
        self.0.split_once('@').map_or("", |(_, domain)| domain)
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Email {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_common_shapes() {
        for ok in [
            "owner@example.com",
            "first.last@example.com",
            "owner+billing@example.com",
            "owner@mail.example.co",
            "a@b.c",
        ] {
            assert!(Email::parse(ok).is_ok(), "rejected {ok}");
        }
    }

    #[test]
    fn test_names_the_broken_rule() {
        assert!(matches!(Email::parse(""), Err(EmailError::Empty)));
        assert!(matches!(
            Email::parse("owner @example.com"),
            Err(EmailError::Whitespace)
        ));
        assert!(matches!(
            Email::parse("missing-at.com"),
            Err(EmailError::MissingAt)
        ));
        assert!(matches!(
            Email::parse("@example.com"),
            Err(EmailError::LocalPartEmpty)
        ));
        assert!(matches!(Email::parse("owner@"), Err(EmailError::DomainEmpty)));
    }

    #[test]
    fn test_rejects_over_max_length() {
        let long = format!("{}@example.com", "x".repeat(250));
        assert!(matches!(
            Email::parse(&long),
            Err(EmailError::TooLong { max: 254 })
        ));
    }

    #[test]
    fn test_splits_into_parts() {
        let email = Email::parse("owner@example.com").unwrap();
        assert_eq!(email.local_part(), "owner");
        assert_eq!(email.domain(), "example.com");
    }

    #[test]
    fn test_display_and_as_ref() {
        let email = Email::parse("owner@example.com").unwrap();
        assert_eq!(format!("{email}"), "owner@example.com");
        let s: &str = email.as_ref();
        assert_eq!(s, "owner@example.com");
    }

    #[test]
    fn test_serde_is_transparent() {
        let email = Email::parse("owner@example.com").unwrap();
        let json = serde_json::to_string(&email).unwrap();
        assert_eq!(json, "\"owner@example.com\"");

        let parsed: Email = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, email);
    }

    #[test]
    fn test_from_str() {
        let email: Email = "owner@example.com".parse().unwrap();
        assert_eq!(email.as_str(), "owner@example.com");
    }
}
