//! SQLite persistence
//!
//! Pooled `rusqlite` connections with embedded migrations. Store
//! implementations run their queries on the blocking pool so request
//! tasks never block on disk I/O.

mod campground_store;
mod connection;
mod migrations;
mod review_store;
mod session_store;
mod user_store;

pub use campground_store::SqliteCampgroundStore;
pub use connection::{ConnectionPool, DatabaseError, PooledConn, create_pool};
pub use migrations::run_migrations;
pub use review_store::SqliteReviewStore;
pub use session_store::SqliteSessionStore;
pub use user_store::SqliteUserStore;
