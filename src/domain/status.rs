//! Baseline-versus-latest classification

use super::version::VersionValue;
use super::VersionRecord;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Relationship between the baseline and the latest resolved version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    /// Resolution failed
    Error,
    /// No baseline recorded for the product
    New,
    /// Baseline matches latest
    Same,
    /// Latest is newer than the baseline
    Upgrade,
    /// Latest is older than the baseline
    Downgrade,
}

impl Status {
    /// Status emoji
    pub fn glyph(&self) -> &'static str {
        match self {
            Status::Error => "❌",
            Status::New => "🆕",
            Status::Same => "✅",
            Status::Upgrade => "⬆️",
            Status::Downgrade => "⬇️",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Status::Error => "Error",
            Status::New => "New",
            Status::Same => "Same",
            Status::Upgrade => "Update",
            Status::Downgrade => "Downgrade",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.glyph(), self.label())
    }
}

/// Classify a resolved record against the operator baseline
///
/// An error always wins over any version string, and a missing baseline
/// means the product has never been tracked.
pub fn classify(latest: &VersionRecord, baseline_version: Option<&str>) -> Status {
    if latest.is_error() {
        return Status::Error;
    }
    let Some(baseline) = baseline_version else {
        return Status::New;
    };

    let baseline = VersionValue::parse(Some(baseline));
    let latest = VersionValue::parse(latest.version.as_deref());
    match baseline.cmp(&latest) {
        Ordering::Equal => Status::Same,
        Ordering::Less => Status::Upgrade,
        Ordering::Greater => Status::Downgrade,
    }
}
