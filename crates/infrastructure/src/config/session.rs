//! Session configuration.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Session cookie and store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Key material for signing the session cookie.
    ///
    /// Startup-fatal when empty; see `AppConfig::validate`.
    #[serde(default = "default_secret", skip_serializing)]
    pub secret: SecretString,

    /// Session cookie name
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,

    /// Days of inactivity before the session expires
    #[serde(default = "default_expiry_days")]
    pub expiry_days: i64,

    /// Minimum idle seconds before an unchanged session row is rewritten
    /// to the store. Amortizes write load; 0 disables the optimization.
    #[serde(default = "default_touch_after_secs")]
    pub touch_after_secs: i64,
}

fn default_secret() -> SecretString {
    SecretString::from("")
}

fn default_cookie_name() -> String {
    "session".to_string()
}

const fn default_expiry_days() -> i64 {
    7
}

const fn default_touch_after_secs() -> i64 {
    24 * 60 * 60
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            secret: default_secret(),
            cookie_name: default_cookie_name(),
            expiry_days: default_expiry_days(),
            touch_after_secs: default_touch_after_secs(),
        }
    }
}
