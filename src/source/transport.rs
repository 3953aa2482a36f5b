//! HTTP transport shared foundation
//!
//! This module provides:
//! - The Transport capability extractors and the notifier depend on
//! - Request options for timeout, redirect following and TLS verification
//! - A reqwest-backed implementation

use crate::error::FetchError;
use async_trait::async_trait;
use reqwest::{redirect, Client};
use std::time::Duration;
use tracing::debug;

/// Default timeout for HTTP requests (10 seconds)
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default User-Agent header
const DEFAULT_USER_AGENT: &str = concat!("emuwatch/", env!("CARGO_PKG_VERSION"));

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// An outbound request with its per-call options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
    pub timeout: Duration,
    /// Follow 3xx responses instead of returning them
    pub follow_redirects: bool,
    /// Verify the server's TLS certificate
    pub verify_tls: bool,
}

impl HttpRequest {
    /// Create a GET request with default options
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            headers: Vec::new(),
            body: None,
            timeout: DEFAULT_TIMEOUT,
            follow_redirects: true,
            verify_tls: true,
        }
    }

    /// Create a POST request with a JSON body
    pub fn post_json(url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            method: Method::Post,
            body: Some(body.into()),
            ..Self::get(url)
        }
        .header("Content-Type", "application/json")
    }

    /// Add a header
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Set the timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Return 3xx responses as-is
    pub fn without_redirects(mut self) -> Self {
        self.follow_redirects = false;
        self
    }

    /// Skip TLS certificate verification
    pub fn without_tls_verification(mut self) -> Self {
        self.verify_tls = false;
        self
    }
}

/// A response reduced to what extractors consume
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    /// Header names are stored lowercase
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    /// Create a response
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    /// Add a header
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.push((name.to_ascii_lowercase(), value.into()));
        self
    }

    /// Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        let name = name.to_ascii_lowercase();
        self.headers
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_redirect(&self) -> bool {
        (300..400).contains(&self.status)
    }

    /// Fail with a Status error unless the response is 2xx
    pub fn ensure_success(self, url: &str) -> Result<Self, FetchError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(FetchError::status(url, self.status))
        }
    }
}

/// Capability to perform one HTTP exchange
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a request; transport failures and timeouts become FetchError
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, FetchError>;
}

/// reqwest-backed transport
///
/// reqwest fixes redirect and TLS policy per client, so one client is kept
/// for each combination.
#[derive(Clone)]
pub struct HttpClient {
    /// Indexed by `(follow_redirects, verify_tls)`
    clients: [Client; 4],
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self, FetchError> {
        Self::with_user_agent(DEFAULT_USER_AGENT)
    }

    /// Create a new HTTP client with a custom default User-Agent
    pub fn with_user_agent(user_agent: &str) -> Result<Self, FetchError> {
        let build = |follow: bool, verify: bool| -> Result<Client, FetchError> {
            let policy = if follow {
                redirect::Policy::limited(10)
            } else {
                redirect::Policy::none()
            };
            Client::builder()
                .timeout(DEFAULT_TIMEOUT)
                .user_agent(user_agent)
                .redirect(policy)
                .danger_accept_invalid_certs(!verify)
                .build()
                .map_err(|e| {
                    FetchError::transport("HTTP client", format!("failed to create HTTP client: {}", e))
                })
        };

        Ok(Self {
            clients: [
                build(false, false)?,
                build(false, true)?,
                build(true, false)?,
                build(true, true)?,
            ],
        })
    }

    fn client_for(&self, request: &HttpRequest) -> &Client {
        let index = (usize::from(request.follow_redirects) << 1) | usize::from(request.verify_tls);
        &self.clients[index]
    }
}

#[async_trait]
impl Transport for HttpClient {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, FetchError> {
        let client = self.client_for(&request);
        let mut builder = match request.method {
            Method::Get => client.get(&request.url),
            Method::Post => client.post(&request.url),
        };
        builder = builder.timeout(request.timeout);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        debug!(
            url = %request.url,
            follow_redirects = request.follow_redirects,
            verify_tls = request.verify_tls,
            "sending request"
        );

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::timeout(&request.url)
            } else {
                FetchError::transport(&request.url, e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_ascii_lowercase(), v.to_string()))
            })
            .collect();
        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::timeout(&request.url)
            } else {
                FetchError::parse(&request.url, format!("failed to read body: {}", e))
            }
        })?;

        debug!(url = %request.url, status, "received response");
        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

/// Build a URL with query parameters
pub fn url_with_query(base: &str, params: &[(&str, &str)]) -> Result<String, FetchError> {
    reqwest::Url::parse_with_params(base, params)
        .map(String::from)
        .map_err(|e| FetchError::transport(base, format!("invalid URL: {}", e)))
}
