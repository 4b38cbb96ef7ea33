//! Recipient email address value object.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$")
        .expect("email pattern is a valid regex")
});

/// A syntactically valid email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validates and wraps an address. Surrounding whitespace is not accepted.
    pub fn parse(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if EMAIL_PATTERN.is_match(&value) {
            Ok(Self(value))
        } else {
            Err(ValidationError::InvalidEmail { value })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The part before `@`, used as the recipient display name.
    pub fn local_part(&self) -> &str {
        self.0.split('@').next().unwrap_or(&self.0)
    }

    /// The part after `@`.
    pub fn domain(&self) -> &str {
        self.0.rsplit('@').next().unwrap_or(&self.0)
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<EmailAddress> for String {
    fn from(address: EmailAddress) -> Self {
        address.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_addresses() {
        for addr in ["user@example.com", "first.last+tag@sub.domain.org", "a_b%c@x.io"] {
            assert!(EmailAddress::parse(addr).is_ok(), "{addr} should be accepted");
        }
    }

    #[test]
    fn rejects_malformed_addresses() {
        for addr in ["", "plain", "no-at.example.com", "user@host", "user@host.c", " user@example.com"] {
            assert_eq!(
                EmailAddress::parse(addr),
                Err(ValidationError::InvalidEmail {
                    value: addr.to_string()
                }),
            );
        }
    }

    #[test]
    fn splits_local_part_and_domain() {
        let addr = EmailAddress::parse("jane.doe@example.com").unwrap();
        assert_eq!(addr.local_part(), "jane.doe");
        assert_eq!(addr.domain(), "example.com");
    }

    #[test]
    fn deserializes_through_validation() {
        let ok: Result<EmailAddress, _> = serde_json::from_str("\"x@example.com\"");
        assert!(ok.is_ok());
        let bad: Result<EmailAddress, _> = serde_json::from_str("\"nope\"");
        assert!(bad.is_err());
    }
}
