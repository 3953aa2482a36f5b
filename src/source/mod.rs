//! Version sources for each monitored product
//!
//! This module provides:
//! - The Extractor capability every product source implements
//! - Reusable extraction strategies (redirect, HTML scrape, date lookup,
//!   multi-source reconciliation, appcast API)
//! - The catalogue wiring the five products to their strategies

mod appcast;
mod catalog;
mod date_lookup;
mod html;
pub mod patterns;
mod reconcile;
mod redirect;
pub mod transport;

#[cfg(test)]
pub(crate) mod fake;

pub use appcast::AppcastExtractor;
pub use catalog::{default_extractors, CatalogOptions, Endpoints};
pub use date_lookup::DateLookupExtractor;
pub use html::HtmlScrapeExtractor;
pub use reconcile::ReconcilingExtractor;
pub use redirect::RedirectExtractor;
pub use transport::{HttpClient, HttpRequest, HttpResponse, Method, Transport};

use crate::domain::VersionRecord;
use crate::error::FetchError;
use async_trait::async_trait;
use tracing::{debug, warn};

/// Fixed desktop browser identity for vendor web pages
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Version and optional release date found by a source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub version: String,
    pub release_date: Option<String>,
}

impl Resolved {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            release_date: None,
        }
    }

    pub fn with_release_date(mut self, date: Option<String>) -> Self {
        self.release_date = date;
        self
    }
}

/// A strategy that turns one product's endpoint responses into a version
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Self-reported product name
    fn name(&self) -> &str;

    /// Short label for the strategy, used in logs
    fn strategy(&self) -> &'static str;

    /// Fetch and extract, surfacing typed failures
    async fn extract(&self) -> Result<Resolved, FetchError>;

    /// Fetch and extract; never fails, errors become the record's `error`
    async fn resolve(&self) -> VersionRecord {
        match self.extract().await {
            Ok(resolved) => {
                debug!(
                    product = self.name(),
                    strategy = self.strategy(),
                    version = %resolved.version,
                    "resolved"
                );
                VersionRecord::resolved(self.name(), resolved.version)
                    .with_release_date(resolved.release_date)
            }
            Err(e) => {
                warn!(product = self.name(), strategy = self.strategy(), "{}", e);
                VersionRecord::failed(self.name(), e.to_string())
            }
        }
    }
}
