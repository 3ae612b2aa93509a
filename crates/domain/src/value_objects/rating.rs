//! Review rating value object

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Minimum allowed rating
pub const MIN_RATING: i64 = 1;
/// Maximum allowed rating
pub const MAX_RATING: i64 = 5;

/// A star rating, bounded to 1..=5
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Rating(i64);

impl Rating {
    /// Create a rating, rejecting values outside 1..=5
    pub fn new(value: i64) -> Result<Self, DomainError> {
        if (MIN_RATING..=MAX_RATING).contains(&value) {
            Ok(Self(value))
        } else {
            Err(DomainError::InvalidRating(value))
        }
    }

    /// Get the numeric value
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for Rating {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for i64 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_bounds() {
        assert!(Rating::new(1).is_ok());
        assert!(Rating::new(5).is_ok());
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(Rating::new(0).is_err());
        assert!(Rating::new(6).is_err());
        assert!(Rating::new(-3).is_err());
    }

    #[test]
    fn serde_round_trip() {
        let rating = Rating::new(4).unwrap();
        let json = serde_json::to_string(&rating).unwrap();
        assert_eq!(json, "4");
        let back: Rating = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rating);
    }

    #[test]
    fn serde_rejects_invalid() {
        let result: Result<Rating, _> = serde_json::from_str("11");
        assert!(result.is_err());
    }
}
