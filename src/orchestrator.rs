//! Monitoring orchestrator for coordinating one run
//!
//! This module provides:
//! - Workflow coordination: baseline → resolve → compare → render → notify
//! - Bounded parallel resolution with progress display
//! - Per-product failure isolation
//! - Optional notification delivery

use crate::baseline::load_baseline;
use crate::config::MonitorConfig;
use crate::domain::ComparisonReport;
use crate::error::{AppError, NotifyError};
use crate::notify::{build_deep_link, Delivery, MessageCard, Notifier};
use crate::progress::Progress;
use crate::resolution::resolve_all;
use crate::source::{default_extractors, HttpClient, Transport};
use chrono::{Local, NaiveDateTime};
use std::sync::Arc;
use tracing::info;

/// Result of a monitoring run
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Local time the run started
    pub checked_at: NaiveDateTime,
    /// Classified products in display order
    pub report: ComparisonReport,
    /// Companion tool link, when a base URL is configured
    pub deep_link: Option<String>,
    /// Status card for the webhook
    pub card: MessageCard,
}

/// Orchestrator for coordinating the monitoring workflow
pub struct Orchestrator {
    config: MonitorConfig,
    transport: Arc<dyn Transport>,
    show_progress: bool,
}

impl Orchestrator {
    /// Create a new orchestrator backed by a real HTTP client
    pub fn new(config: MonitorConfig) -> Result<Self, AppError> {
        let client = HttpClient::new()?;
        Ok(Self::with_transport(config, Arc::new(client)))
    }

    /// Create an orchestrator with a custom transport (for testing)
    pub fn with_transport(config: MonitorConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            config,
            transport,
            show_progress: false,
        }
    }

    /// Show a progress bar while probing vendors
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Resolve every product and build the report and card
    pub async fn run(&self) -> Result<RunOutcome, AppError> {
        let checked_at = Local::now().naive_local();
        let mut progress = Progress::new(self.show_progress);

        // Step 1: Load the operator baseline
        let baseline = load_baseline(&self.config.baseline_path);

        // Step 2: Resolve latest versions
        let extractors = default_extractors(
            self.transport.clone(),
            &self.config.endpoints,
            self.config.catalog,
        )?;
        let resolution = resolve_all(&extractors, self.config.concurrency, &mut progress).await;

        // Step 3: Compare in display order
        let report = ComparisonReport::build(
            resolution.records(),
            &baseline,
            &self.config.display_order,
        );
        info!(
            updates = report.upgrade_count(),
            downgrades = report.downgrade_count(),
            errors = report.error_count(),
            "comparison finished"
        );

        // Step 4: Render
        let deep_link = match self.config.deep_link_base {
            Some(ref base) => Some(build_deep_link(base, &report)?),
            None => None,
        };
        let card = MessageCard::build(&report, deep_link.as_deref(), checked_at);

        Ok(RunOutcome {
            checked_at,
            report,
            deep_link,
            card,
        })
    }

    /// Deliver the card to the configured sink
    pub async fn notify(&self, card: &MessageCard) -> Result<Delivery, NotifyError> {
        let notifier = Notifier::new(self.config.sink.clone(), self.transport.clone());
        if !notifier.is_configured() {
            return notifier.notify(card).await;
        }

        let mut progress = Progress::new(self.show_progress);
        progress.spinner("Sending notification...");
        let result = notifier.notify(card).await;
        progress.finish_and_clear();
        result
    }
}
