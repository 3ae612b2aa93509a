//! Basecamp application layer
//!
//! Use-case services and the ports they depend on. Services enforce
//! ownership rules and referential integrity; stores and external
//! integrations are reached only through the port traits.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use services::{
    AccountService, CampgroundService, NewCampground, NewReview, ReviewService, ReviewWithAuthor,
    UpdateCampground,
};
