//! Review persistence port

use async_trait::async_trait;
use domain::{CampgroundId, Review, ReviewId};

use crate::error::ApplicationError;

/// Persistence operations for reviews
#[async_trait]
pub trait ReviewStore: Send + Sync {
    /// Insert a review
    async fn save(&self, review: &Review) -> Result<(), ApplicationError>;

    /// Fetch a review by ID
    async fn get(&self, id: ReviewId) -> Result<Option<Review>, ApplicationError>;

    /// List the reviews of one campground, oldest first
    async fn list_for_campground(
        &self,
        campground: CampgroundId,
    ) -> Result<Vec<Review>, ApplicationError>;

    /// Delete a review. Returns whether a row was removed.
    async fn delete(&self, id: ReviewId) -> Result<bool, ApplicationError>;

    /// Delete every review of one campground. Returns the number removed.
    async fn delete_for_campground(
        &self,
        campground: CampgroundId,
    ) -> Result<usize, ApplicationError>;

    /// Delete every review. Returns the number removed.
    async fn delete_all(&self) -> Result<usize, ApplicationError>;
}
