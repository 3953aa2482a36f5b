//! Comparison results at product and run level
//!
//! Provides the per-product ComparisonResult and the ComparisonReport that
//! orders them by the curated display order and tracks aggregate counts.

use super::status::classify;
use super::{Baseline, Status, VersionRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Comparison of one product's baseline and latest version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// Product name
    pub name: String,
    /// Baseline version, if recorded
    pub baseline_version: Option<String>,
    /// Latest version, when resolution succeeded
    pub latest_version: Option<String>,
    /// Resolution error, when it failed
    pub error: Option<String>,
    /// Classification
    pub status: Status,
    /// Release date of the latest version
    pub release_date: Option<String>,
}

impl ComparisonResult {
    /// Compares a resolved record against its baseline version
    pub fn new(record: &VersionRecord, baseline_version: Option<&str>) -> Self {
        Self {
            name: record.name.clone(),
            baseline_version: baseline_version.map(str::to_string),
            latest_version: record.version.clone(),
            error: record.error.clone(),
            status: classify(record, baseline_version),
            release_date: record.release_date.clone(),
        }
    }

    /// Latest version, or the error text for failed products
    pub fn latest_or_error(&self) -> &str {
        match (&self.error, &self.latest_version) {
            (Some(error), _) => error,
            (None, Some(version)) => version,
            (None, None) => "-",
        }
    }
}

/// Classified comparison for a whole run
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ComparisonReport {
    /// Results in display order
    pub results: Vec<ComparisonResult>,
}

impl ComparisonReport {
    /// Joins resolved records with the baseline in the given display order
    ///
    /// Only products named in `display_order` are reported, regardless of
    /// which extractors produced records.
    pub fn build(
        records: &BTreeMap<String, VersionRecord>,
        baseline: &Baseline,
        display_order: &[String],
    ) -> Self {
        let results = display_order
            .iter()
            .filter_map(|name| {
                records
                    .get(name)
                    .map(|record| ComparisonResult::new(record, baseline.version_of(name)))
            })
            .collect();
        Self { results }
    }

    /// Number of products with the given status
    pub fn count(&self, status: Status) -> usize {
        self.results.iter().filter(|r| r.status == status).count()
    }

    /// Number of products with a newer release than the baseline
    pub fn upgrade_count(&self) -> usize {
        self.count(Status::Upgrade)
    }

    /// Number of products whose latest release is older than the baseline
    pub fn downgrade_count(&self) -> usize {
        self.count(Status::Downgrade)
    }

    /// Number of products that failed to resolve
    pub fn error_count(&self) -> usize {
        self.count(Status::Error)
    }

    /// Looks up a product's result
    pub fn get(&self, name: &str) -> Option<&ComparisonResult> {
        self.results.iter().find(|r| r.name == name)
    }
}
