//! Username value object

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

const MIN_LEN: usize = 3;
const MAX_LEN: usize = 30;

/// A validated username: 3..=30 chars, alphanumeric plus `-` and `_`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Parse and validate a username
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        let trimmed = s.trim();
        if trimmed.len() < MIN_LEN || trimmed.len() > MAX_LEN {
            return Err(DomainError::InvalidUsername(format!(
                "must be {MIN_LEN}-{MAX_LEN} characters"
            )));
        }
        if !trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(DomainError::InvalidUsername(
                "only letters, digits, '-' and '_' are allowed".to_string(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Borrow the inner string
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Username {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Username> for String {
    fn from(username: Username) -> Self {
        username.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_names() {
        assert!(Username::parse("camper_42").is_ok());
        assert!(Username::parse("jo-anne").is_ok());
    }

    #[test]
    fn trims_whitespace() {
        assert_eq!(Username::parse("  ranger  ").unwrap().as_str(), "ranger");
    }

    #[test]
    fn rejects_short_and_long() {
        assert!(Username::parse("ab").is_err());
        assert!(Username::parse(&"x".repeat(31)).is_err());
    }

    #[test]
    fn rejects_special_characters() {
        assert!(Username::parse("a b c").is_err());
        assert!(Username::parse("$admin").is_err());
    }
}
