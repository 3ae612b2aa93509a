//! Adapters implementing the application ports against external services

mod geocoder;
mod password_hasher;

pub use geocoder::MapTilerGeocoder;
pub use password_hasher::Argon2PasswordHasher;
