//! Review entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;
use crate::value_objects::{CampgroundId, Rating, ReviewId, UserId};

/// A review left on a campground
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    id: ReviewId,
    campground: CampgroundId,
    author: UserId,
    rating: Rating,
    body: String,
    created_at: DateTime<Utc>,
}

impl Review {
    /// Create a new review
    pub fn new(
        campground: CampgroundId,
        author: UserId,
        rating: Rating,
        body: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let body = body.into();
        if body.trim().is_empty() {
            return Err(DomainError::ValidationError(
                "review body must not be empty".to_string(),
            ));
        }
        Ok(Self {
            id: ReviewId::new(),
            campground,
            author,
            rating,
            body,
            created_at: Utc::now(),
        })
    }

    /// Restore a review from storage
    #[must_use]
    pub const fn restore(
        id: ReviewId,
        campground: CampgroundId,
        author: UserId,
        rating: Rating,
        body: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            campground,
            author,
            rating,
            body,
            created_at,
        }
    }

    /// Get the review ID
    #[must_use]
    pub const fn id(&self) -> ReviewId {
        self.id
    }

    /// Get the reviewed campground's ID
    #[must_use]
    pub const fn campground(&self) -> CampgroundId {
        self.campground
    }

    /// Get the review author
    #[must_use]
    pub const fn author(&self) -> UserId {
        self.author
    }

    /// Get the rating
    #[must_use]
    pub const fn rating(&self) -> Rating {
        self.rating
    }

    /// Get the body text
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
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
    fn rejects_empty_body() {
        let result = Review::new(
            CampgroundId::new(),
            UserId::new(),
            Rating::new(3).unwrap(),
            "  ",
        );
        assert!(result.is_err());
    }

    #[test]
    fn keeps_campground_and_author() {
        let campground = CampgroundId::new();
        let author = UserId::new();
        let review = Review::new(campground, author, Rating::new(5).unwrap(), "Great spot").unwrap();
        assert_eq!(review.campground(), campground);
        assert_eq!(review.author(), author);
    }
}
