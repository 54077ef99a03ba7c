//! Identifier types for Runway reference data.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier for a destination country profile.
/// Short lowercase slugs such as `vn` or `thailand`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct CountryId(String);

impl CountryId {
    /// Create a new country ID, normalized to lower case.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into().trim().to_lowercase())
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Validate the country ID format.
    pub fn is_valid(&self) -> bool {
        // Non-empty, alphanumeric with dashes or underscores
        !self.0.is_empty()
            && self.0.len() <= 64
            && self
                .0
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    }
}

impl fmt::Display for CountryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CountryId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for CountryId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<CountryId> for String {
    fn from(id: CountryId) -> Self {
        id.0
    }
}
