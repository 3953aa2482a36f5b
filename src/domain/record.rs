//! Resolved version records

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of one product's resolution
///
/// Exactly one of `version` or `error` is set. A record is never mutated
/// after an extractor hands it back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionRecord {
    /// Self-reported product name
    pub name: String,
    /// Latest version discovered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Release date as YYYY-MM-DD, when the source exposes one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    /// Short diagnostic when resolution failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl VersionRecord {
    /// Creates a successful record
    pub fn resolved(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: Some(version.into()),
            release_date: None,
            error: None,
        }
    }

    /// Creates a failed record
    pub fn failed(name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
            release_date: None,
            error: Some(error.into()),
        }
    }

    /// Attaches a release date
    pub fn with_release_date(mut self, date: Option<String>) -> Self {
        self.release_date = date;
        self
    }

    /// Returns true if resolution failed
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

impl fmt::Display for VersionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.version, &self.error) {
            (_, Some(error)) => write!(f, "{}: error ({})", self.name, error),
            (Some(version), None) => match &self.release_date {
                Some(date) => write!(f, "{}: {} ({})", self.name, version, date),
                None => write!(f, "{}: {}", self.name, version),
            },
            (None, None) => write!(f, "{}: version not found", self.name),
        }
    }
}
