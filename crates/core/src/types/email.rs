//! Validated email address newtype.
//!
//! Validation is structural only: one @ separator with a non-empty local
//! part and domain, within the RFC 5321 length bound. Deliverability is the
//! notification sink's concern, not this type's.

use core::fmt;

use serde::{Deserialize, Serialize};

/// RFC 5321 upper bound on an address.
const MAX_LEN: usize = 254;

/// Why an address string was rejected.
#[derive(thiserror::Error, Debug, Clone)]
pub enum EmailError {
    /// Nothing to parse.
    #[error("email cannot be empty")]
    Empty,
    /// Longer than the RFC 5321 limit.
    #[error("email must be at most {max} characters")]
    TooLong {
        /// The enforced limit, for the error message.
        max: usize,
    },
    /// No @ separator.
    #[error("email must contain an @ symbol")]
    MissingAtSymbol,
    /// Nothing before the @.
    #[error("email local part cannot be empty")]
    EmptyLocalPart,
    /// Nothing after the @.
    #[error("email domain cannot be empty")]
    EmptyDomain,
}

/// A structurally valid email address.
///
/// Used wherever an address crosses a boundary: the `users.email` column,
/// session state, and notification recipients. Serializes as the plain
/// string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Parse and validate an address.
    ///
    /// # Errors
    ///
    /// Returns an [`EmailError`] naming the first structural problem found:
    /// empty input, over-length input, a missing @, or an empty side of it.
    pub fn parse(s: &str) -> Result<Self, EmailError> {
        if s.is_empty() {
            return Err(EmailError::Empty);
        }
        if s.len() > MAX_LEN {
            return Err(EmailError::TooLong { max: MAX_LEN });
        }

        let at = s.find('@').ok_or(EmailError::MissingAtSymbol)?;
        if at == 0 {
            return Err(EmailError::EmptyLocalPart);
        }
        if at == s.len() - 1 {
            return Err(EmailError::EmptyDomain);
        }

        Ok(Self(s.to_owned()))
    }

    /// The address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Everything before the @, used as the greeting name in mail bodies.
    #[must_use]
    pub fn local_part(&self) -> &str {
        self.0.split('@').next().unwrap_or("")
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Stored as TEXT; values coming back from the database were validated when
// they were written, so decoding does not re-parse.
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Email {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Email {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self(s))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Email {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_plausible_addresses() {
        for input in [
            "user@example.com",
            "user.name+tag@example.co.uk",
            "user@subdomain.example.com",
            "a@b.c",
        ] {
            assert!(Email::parse(input).is_ok(), "rejected {input}");
        }
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!(matches!(Email::parse(""), Err(EmailError::Empty)));
    }

    #[test]
    fn test_parse_rejects_over_length() {
        let long = format!("{}@example.com", "a".repeat(250));
        assert!(matches!(
            Email::parse(&long),
            Err(EmailError::TooLong { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_bad_structure() {
        assert!(matches!(
            Email::parse("no-at-symbol"),
            Err(EmailError::MissingAtSymbol)
        ));
        assert!(matches!(
            Email::parse("@example.com"),
            Err(EmailError::EmptyLocalPart)
        ));
        assert!(matches!(Email::parse("user@"), Err(EmailError::EmptyDomain)));
    }

    #[test]
    fn test_local_part_strips_domain() {
        let email = Email::parse("ada@example.com").unwrap();
        assert_eq!(email.local_part(), "ada");
    }

    #[test]
    fn test_display_is_the_address() {
        let email = Email::parse("ada@example.com").unwrap();
        assert_eq!(email.to_string(), "ada@example.com");
        assert_eq!(email.as_str(), "ada@example.com");
    }

    #[test]
    fn test_serde_is_the_plain_string() {
        let email = Email::parse("ada@example.com").unwrap();
        let json = serde_json::to_string(&email).unwrap();
        assert_eq!(json, "\"ada@example.com\"");

        let back: Email = serde_json::from_str(&json).unwrap();
        assert_eq!(back, email);
    }
}
