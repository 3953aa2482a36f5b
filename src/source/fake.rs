//! In-memory transport for extractor tests

use super::transport::{HttpRequest, HttpResponse, Transport};
use crate::error::FetchError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Canned responses keyed by URL without its query string
#[derive(Default)]
pub struct FakeTransport {
    responses: HashMap<String, Result<HttpResponse, FetchError>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, url: &str, response: HttpResponse) -> Self {
        self.responses.insert(url.to_string(), Ok(response));
        self
    }

    pub fn fail(mut self, url: &str, error: FetchError) -> Self {
        self.responses.insert(url.to_string(), Err(error));
        self
    }

    pub fn into_arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Requests seen so far, in order
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, FetchError> {
        let key = request
            .url
            .split('?')
            .next()
            .unwrap_or_default()
            .to_string();
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .get(&key)
            .cloned()
            .unwrap_or_else(|| Err(FetchError::transport(&request.url, "connection refused")))
    }
}
