//! Geographic point value object

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// A WGS84 point, stored longitude-first like GeoJSON
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    longitude: f64,
    latitude: f64,
}

impl GeoPoint {
    /// Create a point, validating coordinate ranges
    pub fn new(longitude: f64, latitude: f64) -> Result<Self, DomainError> {
        if !(-180.0..=180.0).contains(&longitude) || !(-90.0..=90.0).contains(&latitude) {
            return Err(DomainError::InvalidCoordinates {
                longitude,
                latitude,
            });
        }
        Ok(Self {
            longitude,
            latitude,
        })
    }

    /// Longitude in degrees
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Latitude in degrees
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// GeoJSON-style coordinate pair, longitude first
    #[must_use]
    pub const fn coordinates(&self) -> [f64; 2] {
        [self.longitude, self.latitude]
    }
}

impl Default for GeoPoint {
    fn default() -> Self {
        Self {
            longitude: 0.0,
            latitude: 0.0,
        }
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.longitude, self.latitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_coordinates() {
        let point = GeoPoint::new(-122.33, 47.6).unwrap();
        assert_eq!(point.coordinates(), [-122.33, 47.6]);
    }

    #[test]
    fn rejects_out_of_range_longitude() {
        assert!(GeoPoint::new(181.0, 0.0).is_err());
        assert!(GeoPoint::new(-200.0, 0.0).is_err());
    }

    #[test]
    fn rejects_out_of_range_latitude() {
        assert!(GeoPoint::new(0.0, 91.0).is_err());
    }

    #[test]
    fn default_is_origin() {
        let point = GeoPoint::default();
        assert_eq!(point.coordinates(), [0.0, 0.0]);
    }
}
