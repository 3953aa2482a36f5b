//! Structured appcast API extractor
//!
//! Reads the first entry of an `items` array. Four-part versions carry a
//! build number that is dropped, and the first release note may embed a
//! `(YYYYMMDD)` token used as the release date.

use super::patterns::{paren_yyyymmdd, truncate_components};
use super::transport::{HttpRequest, Transport, DEFAULT_TIMEOUT};
use super::{Extractor, Resolved};
use crate::error::FetchError;
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

/// Number of version components kept for comparison
const KEPT_COMPONENTS: usize = 3;

#[derive(Debug, Deserialize)]
struct AppcastResponse {
    #[serde(default)]
    items: Vec<AppcastItem>,
}

#[derive(Debug, Deserialize)]
struct AppcastItem {
    #[serde(default)]
    version: Option<String>,
    #[serde(default, rename = "releaseNoteList")]
    release_note_list: serde_json::Value,
}

/// Extractor for a JSON appcast endpoint
pub struct AppcastExtractor {
    name: String,
    transport: Arc<dyn Transport>,
    url: String,
    timeout: Duration,
}

impl AppcastExtractor {
    /// `url` must already carry its fixed query parameters
    pub fn new(name: impl Into<String>, transport: Arc<dyn Transport>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transport,
            url: url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

fn note_text(note: &serde_json::Value) -> String {
    match note {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[async_trait]
impl Extractor for AppcastExtractor {
    fn name(&self) -> &str {
        &self.name
    }

    fn strategy(&self) -> &'static str {
        "appcast"
    }

    async fn extract(&self) -> Result<Resolved, FetchError> {
        let request = HttpRequest::get(&self.url).timeout(self.timeout);
        let response = self.transport.send(request).await?.ensure_success(&self.url)?;

        let appcast: AppcastResponse = serde_json::from_str(&response.body)
            .map_err(|e| FetchError::parse(&self.url, format!("failed to parse JSON: {}", e)))?;
        let item = appcast.items.first().ok_or(FetchError::NotFound)?;
        let version = item
            .version
            .as_deref()
            .filter(|v| !v.is_empty())
            .ok_or(FetchError::NotFound)?;

        // Optional; a null or malformed list only loses the date
        let release_date = item
            .release_note_list
            .as_array()
            .and_then(|notes| notes.first())
            .and_then(|note| paren_yyyymmdd(&note_text(note)));

        Ok(Resolved::new(truncate_components(version, KEPT_COMPONENTS))
            .with_release_date(release_date))
    }
}
