//! Value objects
//!
//! Small validated types that make invalid states unrepresentable.

mod campground_id;
mod email_address;
mod geo_point;
mod image_ref;
mod price;
mod rating;
mod review_id;
mod user_id;
mod username;

pub use campground_id::CampgroundId;
pub use email_address::EmailAddress;
pub use geo_point::GeoPoint;
pub use image_ref::ImageRef;
pub use price::Price;
pub use rating::Rating;
pub use review_id::ReviewId;
pub use user_id::UserId;
pub use username::Username;
