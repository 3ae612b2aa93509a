//! Forward-geocoding port

use async_trait::async_trait;
use domain::GeoPoint;

use crate::error::ApplicationError;

/// Resolves a free-text location into a map point
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Geocode a query, returning `None` when nothing matches
    async fn forward(&self, query: &str) -> Result<Option<GeoPoint>, ApplicationError>;
}
