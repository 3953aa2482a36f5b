//! Chat notification delivery
//!
//! This module provides:
//! - The status card and deep link renderers
//! - A notifier with an optional sink; no sink is a normal configuration

pub mod card;
pub mod deep_link;

pub use card::MessageCard;
pub use deep_link::build_deep_link;

use crate::error::NotifyError;
use crate::source::{HttpRequest, Transport};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Timeout for the webhook POST
pub const SINK_TIMEOUT: Duration = Duration::from_secs(10);

/// Where the status card is delivered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkConfig {
    pub webhook_url: String,
    pub timeout: Duration,
}

impl SinkConfig {
    pub fn new(webhook_url: impl Into<String>) -> Self {
        Self {
            webhook_url: webhook_url.into(),
            timeout: SINK_TIMEOUT,
        }
    }
}

/// Outcome of a notification attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// The sink accepted the card
    Sent,
    /// No sink is configured
    Skipped,
}

/// Posts status cards to the configured sink, if any
pub struct Notifier {
    sink: Option<SinkConfig>,
    transport: Arc<dyn Transport>,
}

impl Notifier {
    pub fn new(sink: Option<SinkConfig>, transport: Arc<dyn Transport>) -> Self {
        Self { sink, transport }
    }

    pub fn is_configured(&self) -> bool {
        self.sink.is_some()
    }

    /// Deliver the card once; failures are returned, never retried
    pub async fn notify(&self, card: &MessageCard) -> Result<Delivery, NotifyError> {
        let Some(ref sink) = self.sink else {
            debug!("no webhook configured; skipping notification");
            return Ok(Delivery::Skipped);
        };

        let body = serde_json::to_string(card).map_err(|e| NotifyError::Serialize {
            message: e.to_string(),
        })?;
        let request = HttpRequest::post_json(&sink.webhook_url, body).timeout(sink.timeout);

        let response = self
            .transport
            .send(request)
            .await
            .map_err(|e| NotifyError::SendFailed {
                message: e.to_string(),
            })?;
        if !response.is_success() {
            return Err(NotifyError::Rejected {
                status: response.status,
            });
        }

        info!(status = response.status, "notification delivered");
        Ok(Delivery::Sent)
    }
}
