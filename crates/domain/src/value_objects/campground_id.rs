//! Campground identifier value object

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A unique campground identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CampgroundId(Uuid);

impl CampgroundId {
    /// Create a new random campground ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a campground ID from an existing UUID
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Parse a campground ID from a string
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }

    /// Get the underlying UUID
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for CampgroundId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CampgroundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for CampgroundId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips() {
        let id = CampgroundId::new();
        assert_eq!(CampgroundId::parse(&id.to_string()).unwrap(), id);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(CampgroundId::parse("not-a-uuid").is_err());
    }
}
