//! Password hashing using Argon2
//!
//! Argon2id with the library defaults (19 MiB memory, 2 iterations),
//! producing self-describing PHC strings so parameters travel with the
//! hash. Verification is constant-time.

use application::{error::ApplicationError, ports::PasswordHasher};
use argon2::{
    Argon2, PasswordHash, PasswordHasher as ArgonPasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use tracing::debug;

/// Argon2id-based implementation of the `PasswordHasher` port
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2PasswordHasher;

impl Argon2PasswordHasher {
    /// Create a new hasher with default parameters
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Check if a string looks like a PHC-formatted hash
    #[must_use]
    pub fn is_hashed(value: &str) -> bool {
        value.starts_with("$argon2")
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &str) -> Result<String, ApplicationError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| ApplicationError::Internal(format!("password hashing failed: {e}")))?;

        debug!("Password hashed");
        Ok(hash.to_string())
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, ApplicationError> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| ApplicationError::Internal(format!("invalid stored hash: {e}")))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_creates_phc_format() {
        let hasher = Argon2PasswordHasher::new();
        let hash = hasher.hash("hunter2hunter2").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(Argon2PasswordHasher::is_hashed(&hash));
    }

    #[test]
    fn verify_correct_password_succeeds() {
        let hasher = Argon2PasswordHasher::new();
        let hash = hasher.hash("hunter2hunter2").unwrap();
        assert!(hasher.verify("hunter2hunter2", &hash).unwrap());
    }

    #[test]
    fn verify_wrong_password_fails() {
        let hasher = Argon2PasswordHasher::new();
        let hash = hasher.hash("hunter2hunter2").unwrap();
        assert!(!hasher.verify("wrong", &hash).unwrap());
    }

    #[test]
    fn verify_invalid_hash_errors() {
        let hasher = Argon2PasswordHasher::new();
        assert!(hasher.verify("anything", "not-a-hash").is_err());
    }

    #[test]
    fn same_password_hashes_differently() {
        let hasher = Argon2PasswordHasher::new();
        let first = hasher.hash("hunter2hunter2").unwrap();
        let second = hasher.hash("hunter2hunter2").unwrap();
        assert_ne!(first, second);
        assert!(hasher.verify("hunter2hunter2", &first).unwrap());
        assert!(hasher.verify("hunter2hunter2", &second).unwrap());
    }

    #[test]
    fn is_hashed_rejects_plaintext() {
        assert!(!Argon2PasswordHasher::is_hashed("hunter2"));
        assert!(!Argon2PasswordHasher::is_hashed(""));
    }
}
