//! Geocoder configuration.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// MapTiler forward-geocoding configuration
///
/// Geocoding is optional: without an API key, listings keep a default
/// map point instead of a resolved one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocoderConfig {
    /// MapTiler API key; geocoding is disabled when unset
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// Geocoding API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.maptiler.com/geocoding".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}
