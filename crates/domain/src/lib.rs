//! Basecamp domain layer
//!
//! Entities and value objects for the campground listings domain.
//! This crate has no I/O: persistence and HTTP live in the outer layers.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::{Campground, Review, User};
pub use errors::DomainError;
pub use value_objects::{
    CampgroundId, EmailAddress, GeoPoint, ImageRef, Price, Rating, ReviewId, UserId, Username,
};
