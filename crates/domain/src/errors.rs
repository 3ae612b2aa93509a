//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Invalid email address format
    #[error("Invalid email address: {0}")]
    InvalidEmailAddress(String),

    /// Invalid username
    #[error("Invalid username: {0}")]
    InvalidUsername(String),

    /// Rating outside the allowed range
    #[error("Rating must be between 1 and 5, got {0}")]
    InvalidRating(i64),

    /// Negative or non-finite price
    #[error("Price must be a non-negative number, got {0}")]
    InvalidPrice(f64),

    /// Coordinates outside valid ranges
    #[error("Invalid coordinates: longitude {longitude}, latitude {latitude}")]
    InvalidCoordinates { longitude: f64, latitude: f64 },

    /// Entity not found
    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: String, id: String },

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),

    /// Operation not permitted
    #[error("Operation not permitted: {0}")]
    NotPermitted(String),
}

impl DomainError {
    /// Create a not found error
    pub fn not_found(entity_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: entity_type.into(),
            id: id.into(),
        }
    }
}
