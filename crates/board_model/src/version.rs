//! Document version numbers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Version number for tracking document writes.
///
/// Versions start at 1 and are advisory: they tag the last write but are
/// never used to reject one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Version(pub u64);

impl Version {
    /// Create a new version with the given number
    pub fn new(version: u64) -> Self {
        Self(version)
    }

    /// Get the version number
    pub fn value(&self) -> u64 {
        self.0
    }

    /// The version of a freshly initialized document
    pub fn initial() -> Self {
        Self(1)
    }

    /// The version that follows this one
    pub fn next(&self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Whether this is a legal document version (at least 1)
    pub fn is_valid(&self) -> bool {
        self.0 >= 1
    }
}

impl Default for Version {
    fn default() -> Self {
        Self::initial()
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

impl From<u64> for Version {
    fn from(value: u64) -> Self {
        Self(value)
    }
}
