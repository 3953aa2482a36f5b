//! Secondary date lookup
//!
//! Wraps a primary extractor and, once it has a version, fetches a second
//! page that correlates that version with a release date. The lookup is
//! best-effort: any failure leaves the date empty and the version intact.

use super::patterns::date_after_literal;
use super::transport::{HttpRequest, Transport, DEFAULT_TIMEOUT};
use super::{Extractor, Resolved};
use crate::error::FetchError;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Default distance allowed between the version and its date
pub const DEFAULT_WINDOW: usize = 300;

/// Extractor enriching another extractor's result with a release date
pub struct DateLookupExtractor {
    primary: Box<dyn Extractor>,
    transport: Arc<dyn Transport>,
    url: String,
    timeout: Duration,
    window: usize,
}

impl DateLookupExtractor {
    pub fn new(
        primary: Box<dyn Extractor>,
        transport: Arc<dyn Transport>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            primary,
            transport,
            url: url.into(),
            timeout: DEFAULT_TIMEOUT,
            window: DEFAULT_WINDOW,
        }
    }

    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn lookup_date(&self, version: &str) -> Result<Option<String>, FetchError> {
        let request = HttpRequest::get(&self.url)
            .header("User-Agent", super::BROWSER_USER_AGENT)
            .timeout(self.timeout);
        let page = self.transport.send(request).await?.ensure_success(&self.url)?;
        Ok(date_after_literal(&page.body, version, self.window))
    }
}

#[async_trait]
impl Extractor for DateLookupExtractor {
    fn name(&self) -> &str {
        self.primary.name()
    }

    fn strategy(&self) -> &'static str {
        "date-lookup"
    }

    async fn extract(&self) -> Result<Resolved, FetchError> {
        let resolved = self.primary.extract().await?;
        if resolved.release_date.is_some() {
            return Ok(resolved);
        }

        let release_date = match self.lookup_date(&resolved.version).await {
            Ok(date) => date,
            Err(e) => {
                debug!(product = self.name(), "release date lookup failed: {}", e);
                None
            }
        };
        Ok(resolved.with_release_date(release_date))
    }
}
