//! Campground service
//!
//! Create, list, update and delete campground listings. Mutations check
//! ownership; deletion removes the campground's reviews first, since the
//! schema carries no cascading foreign keys.

use std::fmt;
use std::sync::Arc;

use domain::{Campground, CampgroundId, GeoPoint, ImageRef, Price, UserId};
use tracing::{debug, info, instrument, warn};

use crate::error::ApplicationError;
use crate::ports::{CampgroundStore, Geocoder, ReviewStore};

/// Input for creating a campground
#[derive(Debug, Clone)]
pub struct NewCampground {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub location: String,
    pub images: Vec<ImageRef>,
}

/// Input for updating a campground
#[derive(Debug, Clone)]
pub struct UpdateCampground {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub location: String,
    pub add_images: Vec<ImageRef>,
    pub delete_images: Vec<String>,
}

/// Service for campground listings
pub struct CampgroundService {
    campgrounds: Arc<dyn CampgroundStore>,
    reviews: Arc<dyn ReviewStore>,
    geocoder: Option<Arc<dyn Geocoder>>,
}

impl fmt::Debug for CampgroundService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CampgroundService")
            .field("has_geocoder", &self.geocoder.is_some())
            .finish_non_exhaustive()
    }
}

impl CampgroundService {
    /// Create a new campground service
    #[must_use]
    pub fn new(campgrounds: Arc<dyn CampgroundStore>, reviews: Arc<dyn ReviewStore>) -> Self {
        Self {
            campgrounds,
            reviews,
            geocoder: None,
        }
    }

    /// Attach a geocoder for resolving free-text locations
    #[must_use]
    pub fn with_geocoder(mut self, geocoder: Arc<dyn Geocoder>) -> Self {
        self.geocoder = Some(geocoder);
        self
    }

    /// List all campgrounds
    pub async fn list(&self) -> Result<Vec<Campground>, ApplicationError> {
        self.campgrounds.list().await
    }

    /// Fetch one campground, failing with `NotFound` when absent
    pub async fn get(&self, id: CampgroundId) -> Result<Campground, ApplicationError> {
        self.campgrounds
            .get(id)
            .await?
            .ok_or_else(|| ApplicationError::NotFound(format!("Campground {id}")))
    }

    /// Create a campground owned by `author`
    #[instrument(skip(self, input), fields(author = %author, title = %input.title))]
    pub async fn create(
        &self,
        author: UserId,
        input: NewCampground,
    ) -> Result<Campground, ApplicationError> {
        let geometry = self.resolve_location(&input.location).await;
        let price = Price::new(input.price)?;

        let mut campground = Campground::new(
            author,
            input.title,
            input.description,
            price,
            input.location,
            geometry,
        )?;
        for image in input.images {
            campground.add_image(image);
        }

        self.campgrounds.save(&campground).await?;
        info!(id = %campground.id(), "Campground created");
        Ok(campground)
    }

    /// Update a campground; only its author may do so
    #[instrument(skip(self, input), fields(id = %id, acting_user = %acting_user))]
    pub async fn update(
        &self,
        acting_user: UserId,
        id: CampgroundId,
        input: UpdateCampground,
    ) -> Result<Campground, ApplicationError> {
        let mut campground = self.get(id).await?;
        if !campground.is_owned_by(acting_user) {
            return Err(ApplicationError::NotAuthorized(
                "you do not own this campground".to_string(),
            ));
        }

        let geometry = if campground.location() == input.location {
            campground.geometry()
        } else {
            self.resolve_location(&input.location).await
        };
        let price = Price::new(input.price)?;

        campground.update_details(
            input.title,
            input.description,
            price,
            input.location,
            geometry,
        )?;
        campground.remove_images(&input.delete_images);
        for image in input.add_images {
            campground.add_image(image);
        }

        self.campgrounds.save(&campground).await?;
        debug!("Campground updated");
        Ok(campground)
    }

    /// Delete a campground and all of its reviews; only its author may do so
    #[instrument(skip(self), fields(id = %id, acting_user = %acting_user))]
    pub async fn delete(
        &self,
        acting_user: UserId,
        id: CampgroundId,
    ) -> Result<(), ApplicationError> {
        let campground = self.get(id).await?;
        if !campground.is_owned_by(acting_user) {
            return Err(ApplicationError::NotAuthorized(
                "you do not own this campground".to_string(),
            ));
        }

        // Reviews first: the schema does not cascade.
        let removed = self.reviews.delete_for_campground(id).await?;
        self.campgrounds.delete(id).await?;
        info!(reviews_removed = removed, "Campground deleted");
        Ok(())
    }

    /// Resolve a free-text location to a map point, degrading to the
    /// origin when no geocoder is configured or the lookup misses.
    async fn resolve_location(&self, location: &str) -> GeoPoint {
        let Some(geocoder) = &self.geocoder else {
            return GeoPoint::default();
        };
        match geocoder.forward(location).await {
            Ok(Some(point)) => point,
            Ok(None) => {
                debug!(%location, "Geocoder returned no match");
                GeoPoint::default()
            },
            Err(e) => {
                warn!(%location, error = %e, "Geocoding failed, storing default point");
                GeoPoint::default()
            },
        }
    }
}
