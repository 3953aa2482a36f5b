//! Redirect-location extractor
//!
//! Issues a GET without following redirects and pulls the version (and an
//! optional `YYYYMMDD` path segment) out of the `Location` header.

use super::patterns::{capture, yyyymmdd_to_iso};
use super::transport::{HttpRequest, Transport, DEFAULT_TIMEOUT};
use super::{Extractor, Resolved};
use crate::error::FetchError;
use async_trait::async_trait;
use regex::Regex;
use std::sync::Arc;
use std::time::Duration;

/// Extractor reading the target of a download redirect
pub struct RedirectExtractor {
    name: String,
    transport: Arc<dyn Transport>,
    url: String,
    user_agent: String,
    timeout: Duration,
    version_re: Regex,
    date_re: Option<Regex>,
}

impl RedirectExtractor {
    /// Create a redirect extractor; `version_re` must have one capture group
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
            version_re,
            date_re: None,
        }
    }

    /// Also read a `YYYYMMDD` capture from the redirect target
    pub fn with_date_pattern(mut self, date_re: Regex) -> Self {
        self.date_re = Some(date_re);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl Extractor for RedirectExtractor {
    fn name(&self) -> &str {
        &self.name
    }

    fn strategy(&self) -> &'static str {
        "redirect"
    }

    async fn extract(&self) -> Result<Resolved, FetchError> {
        let request = HttpRequest::get(&self.url)
            .header("User-Agent", &self.user_agent)
            .timeout(self.timeout)
            .without_redirects();
        let response = self.transport.send(request).await?;

        // Only a redirect carries the signal; any other status is "not found"
        if !response.is_redirect() {
            return Err(FetchError::NotFound);
        }
        let location = response.header("location").ok_or(FetchError::NotFound)?;
        let version = capture(&self.version_re, location).ok_or(FetchError::NotFound)?;
        let release_date = self
            .date_re
            .as_ref()
            .and_then(|re| capture(re, location))
            .and_then(|token| yyyymmdd_to_iso(&token));

        Ok(Resolved::new(version).with_release_date(release_date))
    }
}
