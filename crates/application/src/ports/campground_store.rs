//! Campground persistence port

use async_trait::async_trait;
use domain::{Campground, CampgroundId};

use crate::error::ApplicationError;

/// Persistence operations for campgrounds
#[async_trait]
pub trait CampgroundStore: Send + Sync {
    /// Insert or update a campground. The author column is written only on
    /// insert; updates never reassign ownership.
    async fn save(&self, campground: &Campground) -> Result<(), ApplicationError>;

    /// Fetch a campground by ID
    async fn get(&self, id: CampgroundId) -> Result<Option<Campground>, ApplicationError>;

    /// List all campgrounds, newest first
    async fn list(&self) -> Result<Vec<Campground>, ApplicationError>;

    /// Delete a campground. Returns whether a row was removed.
    async fn delete(&self, id: CampgroundId) -> Result<bool, ApplicationError>;

    /// Delete every campground. Returns the number of rows removed.
    async fn delete_all(&self) -> Result<usize, ApplicationError>;

    /// Count campgrounds
    async fn count(&self) -> Result<u64, ApplicationError>;
}
