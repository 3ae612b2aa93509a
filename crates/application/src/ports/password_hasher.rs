//! Credential-hashing port

use crate::error::ApplicationError;

/// Hashes and verifies account passwords
///
/// Implementations store hashes as self-describing PHC strings so the
/// parameters travel with the hash.
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password
    fn hash(&self, password: &str) -> Result<String, ApplicationError>;

    /// Verify a plaintext password against a stored hash
    fn verify(&self, password: &str, hash: &str) -> Result<bool, ApplicationError>;
}
