//! HTML-scrape extractor
//!
//! Fetches a release-notes page and applies a phrase regex to find the
//! version. The first match wins; when a date window is configured, the
//! nearest human-readable date around that match becomes the release date.

use super::patterns::date_near;
use super::transport::{HttpRequest, Transport, DEFAULT_TIMEOUT};
use super::{Extractor, Resolved};
use crate::error::FetchError;
use async_trait::async_trait;
use regex::Regex;
use std::sync::Arc;
use std::time::Duration;

/// Extractor scraping a version out of an HTML page
pub struct HtmlScrapeExtractor {
    name: String,
    transport: Arc<dyn Transport>,
    url: String,
    user_agent: String,
    timeout: Duration,
    verify_tls: bool,
    version_re: Regex,
    date_window: Option<usize>,
}

impl HtmlScrapeExtractor {
    /// Create a scraper; `version_re` must have one capture group
    pub fn new(
        name: impl Into<String>,
        transport: Arc<dyn Transport>,
        url: impl Into<String>,
        version_re: Regex,
    ) -> Self {
        Self {
            name: name.into(),
            transport,
            url: url.into(),
            user_agent: super::BROWSER_USER_AGENT.to_string(),
            timeout: DEFAULT_TIMEOUT,
            verify_tls: true,
            version_re,
            date_window: None,
        }
    }

    /// Look for a release date within `window` bytes of the version match
    pub fn with_date_window(mut self, window: usize) -> Self {
        self.date_window = Some(window);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Accept the endpoint's certificate without verification
    pub fn without_tls_verification(mut self) -> Self {
        self.verify_tls = false;
        self
    }
}

#[async_trait]
impl Extractor for HtmlScrapeExtractor {
    fn name(&self) -> &str {
        &self.name
    }

    fn strategy(&self) -> &'static str {
        "html"
    }

    async fn extract(&self) -> Result<Resolved, FetchError> {
        let mut request = HttpRequest::get(&self.url)
            .header("User-Agent", &self.user_agent)
            .timeout(self.timeout);
        if !self.verify_tls {
            request = request.without_tls_verification();
        }
        let page = self.transport.send(request).await?.ensure_success(&self.url)?;

        let caps = self
            .version_re
            .captures(&page.body)
            .ok_or(FetchError::NotFound)?;
        let whole = caps.get(0).ok_or(FetchError::NotFound)?;
        let version = caps.get(1).ok_or(FetchError::NotFound)?.as_str();

        let release_date = self
            .date_window
            .and_then(|window| date_near(&page.body, whole.start(), whole.end(), window));

        Ok(Resolved::new(version).with_release_date(release_date))
    }
}
