//! SQLite database configuration.

use serde::{Deserialize, Serialize};

use super::default_true;

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite file, or `:memory:` for an in-memory database
    #[serde(default = "default_path")]
    pub path: String,

    /// Maximum pooled connections
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Run pending migrations on startup
    #[serde(default = "default_true")]
    pub run_migrations: bool,
}

fn default_path() -> String {
    "basecamp.db".to_string()
}

const fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            max_connections: default_max_connections(),
            run_migrations: true,
        }
    }
}
