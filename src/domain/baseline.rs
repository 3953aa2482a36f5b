//! Operator-maintained baseline versions

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One baseline entry; extra operator fields are ignored
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BaselineEntry {
    /// Version the operator believes is deployed
    #[serde(default)]
    pub version: Option<String>,
}

/// Read-only mapping of product name to baseline entry
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Baseline {
    entries: HashMap<String, BaselineEntry>,
}

impl Baseline {
    /// Creates an empty baseline (every product is new)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a baseline from an existing map
    pub fn new(entries: HashMap<String, BaselineEntry>) -> Self {
        Self { entries }
    }

    /// Builds a baseline from `(name, version)` pairs
    pub fn from_versions<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let entries = pairs
            .into_iter()
            .map(|(name, version)| {
                (
                    name.to_string(),
                    BaselineEntry {
                        version: Some(version.to_string()),
                    },
                )
            })
            .collect();
        Self { entries }
    }

    /// Returns the baseline version for a product, if recorded
    pub fn version_of(&self, name: &str) -> Option<&str> {
        self.entries.get(name).and_then(|e| e.version.as_deref())
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no entries are recorded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_of() {
        let baseline = Baseline::from_versions([("MEmu", "9.3.0")]);
        assert_eq!(baseline.version_of("MEmu"), Some("9.3.0"));
        assert_eq!(baseline.version_of("NoxPlayer"), None);
    }

    #[test]
    fn test_deserialize_ignores_extra_fields() {
        let json = r#"{
            "NoxPlayer": {"version": "7.0.6.2", "note": "pinned by ops"},
            "MEmu": {"note": "no version yet"}
        }"#;
        let baseline: Baseline = serde_json::from_str(json).unwrap();
        assert_eq!(baseline.len(), 2);
        assert_eq!(baseline.version_of("NoxPlayer"), Some("7.0.6.2"));
        assert_eq!(baseline.version_of("MEmu"), None);
    }

    #[test]
    fn test_empty() {
        assert!(Baseline::empty().is_empty());
    }
}
