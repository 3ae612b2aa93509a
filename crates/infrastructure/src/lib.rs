//! Basecamp infrastructure layer
//!
//! Concrete implementations of the application ports: SQLite persistence,
//! the Argon2 password hasher, the MapTiler geocoder, the Tera view
//! engine, configuration loading and the seed batch job.

pub mod adapters;
pub mod config;
pub mod persistence;
pub mod seed;
pub mod templates;

pub use adapters::{Argon2PasswordHasher, MapTilerGeocoder};
pub use config::{AppConfig, Environment};
pub use persistence::{ConnectionPool, DatabaseError, SqliteSessionStore, create_pool};
pub use templates::{ViewContext, ViewEngine};
