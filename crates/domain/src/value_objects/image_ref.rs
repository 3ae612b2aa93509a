//! Image reference value object

use serde::{Deserialize, Serialize};

/// A reference to an externally stored image: its URL and the storage
/// identifier needed to delete it later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    /// Public URL of the image
    pub url: String,
    /// Storage identifier (e.g. the path within the hosting account)
    pub filename: String,
}

impl ImageRef {
    /// Create an image reference
    #[must_use]
    pub fn new(url: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            filename: filename.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_round_trip() {
        let image = ImageRef::new("https://example.com/a.png", "basecamp/a");
        let json = serde_json::to_string(&image).unwrap();
        let back: ImageRef = serde_json::from_str(&json).unwrap();
        assert_eq!(back, image);
    }
}
