//! User entity
//!
//! Credential material is an opaque PHC hash string produced by the
//! infrastructure hasher; plaintext never enters the domain.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{EmailAddress, UserId, Username};

/// A registered account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    username: Username,
    email: EmailAddress,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user from already-hashed credentials
    #[must_use]
    pub fn new(username: Username, email: EmailAddress, password_hash: String) -> Self {
        Self {
            id: UserId::new(),
            username,
            email,
            password_hash,
            created_at: Utc::now(),
        }
    }

    /// Restore a user from storage
    #[must_use]
    pub const fn restore(
        id: UserId,
        username: Username,
        email: EmailAddress,
        password_hash: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            username,
            email,
            password_hash,
            created_at,
        }
    }

    /// Get the user ID
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Get the username
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Get the email address
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Get the stored credential hash
    #[must_use]
    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    /// Get the creation timestamp
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_user_gets_fresh_id() {
        let a = User::new(
            Username::parse("camper_a").unwrap(),
            EmailAddress::parse("a@example.com").unwrap(),
            "$argon2id$stub".to_string(),
        );
        let b = User::new(
            Username::parse("camper_b").unwrap(),
            EmailAddress::parse("b@example.com").unwrap(),
            "$argon2id$stub".to_string(),
        );
        assert_ne!(a.id(), b.id());
    }
}
