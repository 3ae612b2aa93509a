//! Campground entity
//!
//! A listed campground: title, description, price, free-text location,
//! a geographic point for map display, and image references. The author
//! is fixed at creation and never reassigned.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;
use crate::value_objects::{CampgroundId, GeoPoint, ImageRef, Price, UserId};

/// A campground listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Campground {
    id: CampgroundId,
    title: String,
    description: String,
    price: Price,
    location: String,
    geometry: GeoPoint,
    images: Vec<ImageRef>,
    author: UserId,
    created_at: DateTime<Utc>,
}

impl Campground {
    /// Create a new campground owned by `author`
    pub fn new(
        author: UserId,
        title: impl Into<String>,
        description: impl Into<String>,
        price: Price,
        location: impl Into<String>,
        geometry: GeoPoint,
    ) -> Result<Self, DomainError> {
        let title = title.into();
        let location = location.into();
        if title.trim().is_empty() {
            return Err(DomainError::ValidationError(
                "title must not be empty".to_string(),
            ));
        }
        if location.trim().is_empty() {
            return Err(DomainError::ValidationError(
                "location must not be empty".to_string(),
            ));
        }
        Ok(Self {
            id: CampgroundId::new(),
            title,
            description: description.into(),
            price,
            location,
            geometry,
            images: Vec::new(),
            author,
            created_at: Utc::now(),
        })
    }

    /// Restore a campground from storage
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn restore(
        id: CampgroundId,
        title: String,
        description: String,
        price: Price,
        location: String,
        geometry: GeoPoint,
        images: Vec<ImageRef>,
        author: UserId,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title,
            description,
            price,
            location,
            geometry,
            images,
            author,
            created_at,
        }
    }

    /// Get the campground ID
    #[must_use]
    pub const fn id(&self) -> CampgroundId {
        self.id
    }

    /// Get the title
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Get the description
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Get the nightly price
    #[must_use]
    pub const fn price(&self) -> Price {
        self.price
    }

    /// Get the free-text location
    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Get the map point
    #[must_use]
    pub const fn geometry(&self) -> GeoPoint {
        self.geometry
    }

    /// Get the image references
    #[must_use]
    pub fn images(&self) -> &[ImageRef] {
        &self.images
    }

    /// Get the owning author. There is no setter: ownership is immutable.
    #[must_use]
    pub const fn author(&self) -> UserId {
        self.author
    }

    /// Get the creation timestamp
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Check whether `user` owns this campground
    #[must_use]
    pub fn is_owned_by(&self, user: UserId) -> bool {
        self.author == user
    }

    /// Replace the listing fields that an edit may change
    pub fn update_details(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
        price: Price,
        location: impl Into<String>,
        geometry: GeoPoint,
    ) -> Result<(), DomainError> {
        let title = title.into();
        let location = location.into();
        if title.trim().is_empty() {
            return Err(DomainError::ValidationError(
                "title must not be empty".to_string(),
            ));
        }
        if location.trim().is_empty() {
            return Err(DomainError::ValidationError(
                "location must not be empty".to_string(),
            ));
        }
        self.title = title;
        self.description = description.into();
        self.price = price;
        self.location = location;
        self.geometry = geometry;
        Ok(())
    }

    /// Append an image reference
    pub fn add_image(&mut self, image: ImageRef) {
        self.images.push(image);
    }

    /// Remove images whose storage identifier is in `filenames`
    pub fn remove_images(&mut self, filenames: &[String]) {
        self.images
            .retain(|image| !filenames.contains(&image.filename));
    }
}
