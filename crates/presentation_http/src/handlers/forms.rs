//! Typed form inputs
//!
//! Flat field names, validated with `validator` derives before any
//! service call. Violations become a 400 page.

use serde::Deserialize;
use validator::Validate;

use crate::error::PageError;

/// Validate a form, mapping violations to a 400 page error
pub(crate) fn validated<T: Validate>(form: T) -> Result<T, PageError> {
    form.validate()
        .map_err(|e| PageError::bad_request(e.to_string()))?;
    Ok(form)
}

/// Campground create form
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CampgroundForm {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,

    #[validate(length(min = 1, message = "location is required"))]
    pub location: String,

    #[validate(range(min = 0.0, message = "price must be non-negative"))]
    pub price: f64,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub image_url: Option<String>,

    #[serde(default)]
    pub image_filename: Option<String>,
}

/// Campground edit form; checkboxes select image references to drop
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateCampgroundForm {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,

    #[validate(length(min = 1, message = "location is required"))]
    pub location: String,

    #[validate(range(min = 0.0, message = "price must be non-negative"))]
    pub price: f64,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub image_url: Option<String>,

    #[serde(default)]
    pub image_filename: Option<String>,

    #[serde(default)]
    pub delete_images: Vec<String>,
}

/// Review form
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReviewForm {
    #[validate(range(min = 1, max = 5, message = "rating must be between 1 and 5"))]
    pub rating: i64,

    #[validate(length(min = 1, message = "review text is required"))]
    pub body: String,
}

/// Registration form
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterForm {
    #[validate(length(min = 3, max = 30, message = "username must be 3-30 characters"))]
    pub username: String,

    #[validate(email(message = "a valid email is required"))]
    pub email: String,

    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
}

/// Login form
#[derive(Debug, Clone, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}
