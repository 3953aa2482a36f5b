//! JSON output formatter for machine processing

use crate::domain::{ComparisonResult, Status};
use crate::orchestrator::RunOutcome;
use crate::output::OutputFormatter;
use serde::Serialize;
use std::io::Write;

/// JSON formatter for machine-readable output
#[derive(Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new() -> Self {
        Self
    }
}

/// JSON representation of a run
#[derive(Serialize)]
struct JsonOutput<'a> {
    checked_at: String,
    summary: JsonSummary,
    products: &'a [ComparisonResult],
    #[serde(skip_serializing_if = "Option::is_none")]
    deep_link: Option<&'a str>,
}

/// Aggregate counts
#[derive(Serialize)]
struct JsonSummary {
    updates: usize,
    downgrades: usize,
    new: usize,
    same: usize,
    errors: usize,
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, outcome: &RunOutcome, writer: &mut dyn Write) -> std::io::Result<()> {
        let report = &outcome.report;
        let output = JsonOutput {
            checked_at: outcome.checked_at.format("%Y-%m-%dT%H:%M:%S").to_string(),
            summary: JsonSummary {
                updates: report.upgrade_count(),
                downgrades: report.downgrade_count(),
                new: report.count(Status::New),
                same: report.count(Status::Same),
                errors: report.error_count(),
            },
            products: &report.results,
            deep_link: outcome.deep_link.as_deref(),
        };

        serde_json::to_writer_pretty(&mut *writer, &output)?;
        writeln!(writer)?;
        Ok(())
    }
}
