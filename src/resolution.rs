//! Resolution of every product's latest version
//!
//! Runs all extractors with bounded concurrency and keys the resulting
//! records by the name each record reports about itself.

use crate::domain::VersionRecord;
use crate::progress::Progress;
use crate::source::Extractor;
use futures::future::join_all;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::info;

/// Default number of extractors run at once
pub const DEFAULT_CONCURRENCY: usize = 5;

/// Records of one resolution run, keyed by self-reported name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolutionReport {
    records: BTreeMap<String, VersionRecord>,
}

impl ResolutionReport {
    /// Builds a report from records; a later duplicate name replaces an earlier one
    pub fn from_records(records: impl IntoIterator<Item = VersionRecord>) -> Self {
        let records = records.into_iter().map(|r| (r.name.clone(), r)).collect();
        Self { records }
    }

    pub fn records(&self) -> &BTreeMap<String, VersionRecord> {
        &self.records
    }

    pub fn get(&self, name: &str) -> Option<&VersionRecord> {
        self.records.get(name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of records carrying an error
    pub fn error_count(&self) -> usize {
        self.records.values().filter(|r| r.is_error()).count()
    }
}

/// Resolve every extractor and collect the records
pub async fn resolve_all(
    extractors: &[Box<dyn Extractor>],
    concurrency: usize,
    progress: &mut Progress,
) -> ResolutionReport {
    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));
    progress.start(extractors.len() as u64, "Checking emulators");

    let ticker = &*progress;
    let tasks = extractors.iter().map(|extractor| {
        let semaphore = semaphore.clone();
        async move {
            // never closed
            let _permit = semaphore.acquire().await.ok();
            let record = extractor.resolve().await;
            ticker.set_message(&format!("Checked {}", record.name));
            ticker.inc();
            record
        }
    });
    let records = join_all(tasks).await;
    progress.finish_and_clear();

    let report = ResolutionReport::from_records(records);
    info!(
        products = report.len(),
        errors = report.error_count(),
        "resolution finished"
    );
    report
}
