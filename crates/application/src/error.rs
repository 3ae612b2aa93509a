//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Entity not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Acting user is not permitted to perform the operation
    #[error("Not authorized: {0}")]
    NotAuthorized(String),

    /// Unique-constraint violation (username or email already taken)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// External service error (e.g. geocoder)
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_error_converts_transparently() {
        let err: ApplicationError = DomainError::not_found("User", "123").into();
        assert_eq!(err.to_string(), "User not found: 123");
    }

    #[test]
    fn conflict_message() {
        let err = ApplicationError::Conflict("username taken".to_string());
        assert_eq!(err.to_string(), "Conflict: username taken");
    }
}
