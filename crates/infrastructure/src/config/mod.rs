//! Application configuration
//!
//! Split into focused sub-modules by domain:
//! - `server`: HTTP server settings
//! - `database`: SQLite database settings
//! - `session`: cookie, expiry and store touch interval
//! - `security`: content-security-policy origin allow-lists
//! - `geocoder`: forward-geocoding credentials

mod database;
mod geocoder;
mod security;
mod server;
mod session;

use std::fmt;

use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

pub use database::DatabaseConfig;
pub use geocoder::GeocoderConfig;
pub use security::SecurityConfig;
pub use server::ServerConfig;
pub use session::SessionConfig;

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Application environment (development or production)
///
/// Controls whether internal error detail may reach rendered pages and
/// whether startup validation is strict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment - relaxed validation, verbose errors
    #[default]
    Development,
    /// Production environment - strict validation, generic errors
    Production,
}

impl Environment {
    /// Whether this is the production environment
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(format!(
                "Invalid environment: {s}. Use 'development' or 'production'"
            )),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment
    #[serde(default)]
    pub environment: Environment,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Session configuration
    #[serde(default)]
    pub session: SessionConfig,

    /// Security header configuration
    #[serde(default)]
    pub security: SecurityConfig,

    /// Geocoder configuration
    #[serde(default)]
    pub geocoder: GeocoderConfig,
}

impl AppConfig {
    /// Load configuration from `config.toml` (optional) and `BASECAMP_*`
    /// environment variables. The bare `SESSION_SECRET` and `DB_URL`
    /// variables are honored as well, matching the deployment contract.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let mut builder = ::config::Config::builder()
            .add_source(::config::File::with_name("config").required(false))
            .add_source(
                ::config::Environment::with_prefix("BASECAMP")
                    .separator("__")
                    .try_parsing(true),
            );

        if let Ok(secret) = std::env::var("SESSION_SECRET") {
            builder = builder.set_override("session.secret", secret)?;
        }
        if let Ok(db_url) = std::env::var("DB_URL") {
            builder = builder.set_override("database.path", db_url)?;
        }

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Validate startup-fatal conditions
    ///
    /// A missing session secret or database path cannot be defaulted: the
    /// first would make every deployment's cookies forgeable, the second
    /// would silently write to the wrong file.
    pub fn validate(&self) -> Result<(), String> {
        if self.session.secret.expose_secret().is_empty() {
            return Err(
                "session secret is not set (SESSION_SECRET or session.secret)".to_string(),
            );
        }
        if self.database.path.is_empty() {
            return Err("database path is not set (DB_URL or database.path)".to_string());
        }
        if self.environment.is_production() && self.session.secret.expose_secret().len() < 32 {
            return Err("session secret must be at least 32 bytes in production".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use secrecy::SecretString;

    use super::*;

    fn valid_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.session.secret = SecretString::from("a".repeat(32));
        config.database.path = ":memory:".to_string();
        config
    }

    #[test]
    fn validate_accepts_complete_config() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_secret() {
        let mut config = valid_config();
        config.session.secret = SecretString::from("");
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_database_path() {
        let mut config = valid_config();
        config.database.path = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn production_requires_long_secret() {
        let mut config = valid_config();
        config.environment = Environment::Production;
        config.session.secret = SecretString::from("short");
        assert!(config.validate().is_err());
    }

    #[test]
    fn environment_parses_aliases() {
        assert_eq!(
            "prod".parse::<Environment>().unwrap(),
            Environment::Production
        );
        assert_eq!(
            "dev".parse::<Environment>().unwrap(),
            Environment::Development
        );
        assert!("staging".parse::<Environment>().is_err());
    }
}
