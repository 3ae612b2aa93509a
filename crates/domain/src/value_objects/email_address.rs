//! Email address value object

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// A validated email address
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Parse and validate an email address
    ///
    /// Validation is the pragmatic local@domain.tld check, not full RFC 5322.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        let trimmed = s.trim();

        let Some((local, domain)) = trimmed.split_once('@') else {
            return Err(DomainError::InvalidEmailAddress(trimmed.to_string()));
        };

        if local.is_empty()
            || domain.is_empty()
            || !domain.contains('.')
            || domain.starts_with('.')
            || domain.ends_with('.')
            || trimmed.contains(char::is_whitespace)
        {
            return Err(DomainError::InvalidEmailAddress(trimmed.to_string()));
        }

        Ok(Self(trimmed.to_lowercase()))
    }

    /// Borrow the inner string
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<EmailAddress> for String {
    fn from(email: EmailAddress) -> Self {
        email.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
