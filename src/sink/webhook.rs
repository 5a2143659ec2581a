//! Webhook sink — POSTs the registration as JSON to a backend endpoint.
//!
//! Thin HTTP wrapper. Any 2xx counts as recorded; everything else is a
//! rejection carrying the status and body.

use std::time::Duration;

use super::types::{Registration, RegistrationSink, SinkError};

pub const DEFAULT_WEBHOOK_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_WEBHOOK_CONNECT_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WebhookTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for WebhookTimeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_WEBHOOK_TIMEOUT_SECS, connect_secs: DEFAULT_WEBHOOK_CONNECT_TIMEOUT_SECS }
    }
}

// =============================================================================
// CLIENT
// =============================================================================

pub struct WebhookSink {
    http: reqwest::Client,
    url: String,
}

impl WebhookSink {
    pub fn new(url: impl Into<String>, timeouts: WebhookTimeouts) -> Result<Self, SinkError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| SinkError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, url: url.into() })
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait::async_trait]
impl RegistrationSink for WebhookSink {
    async fn register(&self, registration: &Registration) -> Result<(), SinkError> {
        let response = self
            .http
            .post(&self.url)
            .json(registration)
            .send()
            .await
            .map_err(|e| SinkError::Request(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response
            .text()
            .await
            .map_err(|e| SinkError::Request(e.to_string()))?;
        tracing::warn!(status = status.as_u16(), url = %self.url, "registration webhook rejected request");
        Err(SinkError::Rejected { status: status.as_u16(), body })
    }
}

#[cfg(test)]
#[path = "webhook_test.rs"]
mod tests;
