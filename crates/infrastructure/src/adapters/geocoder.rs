//! MapTiler forward-geocoding adapter
//!
//! Resolves free-text locations ("Bend, Oregon") to a lon/lat point via
//! the MapTiler geocoding API. Responses are GeoJSON feature collections;
//! the first feature's center wins.

use application::{error::ApplicationError, ports::Geocoder};
use async_trait::async_trait;
use domain::GeoPoint;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::config::GeocoderConfig;

/// MapTiler implementation of the `Geocoder` port
pub struct MapTilerGeocoder {
    client: reqwest::Client,
    base_url: String,
    api_key: SecretString,
}

impl std::fmt::Debug for MapTilerGeocoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapTilerGeocoder")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    center: [f64; 2],
}

impl MapTilerGeocoder {
    /// Create a geocoder from configuration, or `None` when no API key is set
    pub fn from_config(config: &GeocoderConfig) -> Result<Option<Self>, ApplicationError> {
        let Some(api_key) = config.api_key.clone() else {
            return Ok(None);
        };

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ApplicationError::Configuration(e.to_string()))?;

        Ok(Some(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
        }))
    }
}

#[async_trait]
impl Geocoder for MapTilerGeocoder {
    #[instrument(skip(self))]
    async fn forward(&self, query: &str) -> Result<Option<GeoPoint>, ApplicationError> {
        let url = format!(
            "{}/{}.json",
            self.base_url,
            urlencode(query)
        );

        let response = self
            .client
            .get(&url)
            .query(&[("key", self.api_key.expose_secret()), ("limit", "1")])
            .send()
            .await
            .map_err(|e| ApplicationError::ExternalService(format!("geocoding request: {e}")))?;

        if !response.status().is_success() {
            return Err(ApplicationError::ExternalService(format!(
                "geocoding returned status {}",
                response.status()
            )));
        }

        let collection: FeatureCollection = response
            .json()
            .await
            .map_err(|e| ApplicationError::ExternalService(format!("geocoding response: {e}")))?;

        let Some(feature) = collection.features.first() else {
            debug!("No geocoding match");
            return Ok(None);
        };

        match GeoPoint::new(feature.center[0], feature.center[1]) {
            Ok(point) => Ok(Some(point)),
            Err(e) => {
                warn!(error = %e, "Geocoder returned out-of-range coordinates");
                Ok(None)
            },
        }
    }
}

/// Percent-encode a path segment
fn urlencode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char);
            },
            _ => {
                out.push('%');
                out.push_str(&format!("{byte:02X}"));
            },
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn config(base_url: String) -> GeocoderConfig {
        GeocoderConfig {
            api_key: Some(SecretString::from("test-key")),
            base_url,
            timeout_secs: 5,
        }
    }

    #[test]
    fn from_config_without_key_is_disabled() {
        let geocoder = MapTilerGeocoder::from_config(&GeocoderConfig::default()).unwrap();
        assert!(geocoder.is_none());
    }

    #[test]
    fn urlencode_escapes_spaces_and_commas() {
        assert_eq!(urlencode("Bend, Oregon"), "Bend%2C%20Oregon");
    }

    #[tokio::test]
    async fn forward_parses_first_feature() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/Bend%2C%20Oregon.json"))
            .and(query_param("key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "features": [
                    { "center": [-121.31, 44.06] },
                    { "center": [0.0, 0.0] }
                ]
            })))
            .mount(&server)
            .await;

        let geocoder = MapTilerGeocoder::from_config(&config(server.uri()))
            .unwrap()
            .unwrap();
        let point = geocoder.forward("Bend, Oregon").await.unwrap().unwrap();
        assert_eq!(point.coordinates(), [-121.31, 44.06]);
    }

    #[tokio::test]
    async fn forward_returns_none_on_no_match() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "features": [] })),
            )
            .mount(&server)
            .await;

        let geocoder = MapTilerGeocoder::from_config(&config(server.uri()))
            .unwrap()
            .unwrap();
        assert!(geocoder.forward("Nowhere").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn forward_maps_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let geocoder = MapTilerGeocoder::from_config(&config(server.uri()))
            .unwrap()
            .unwrap();
        let result = geocoder.forward("Bend").await;
        assert!(matches!(result, Err(ApplicationError::ExternalService(_))));
    }
}
