//! Sink — where a validated registration goes.
//!
//! DESIGN
//! ======
//! The form controller only sees the `RegistrationSink` trait. `SinkClient`
//! is the concrete dispatch used by the binary, selected from configuration:
//! a simulated backend, an HTTP webhook, or a Resend confirmation email.
//! Tests substitute their own trait implementations.

pub mod confirmation;
pub mod email;
pub mod simulated;
pub mod types;
pub mod webhook;

pub use types::{Registration, RegistrationSink, SinkError};

use crate::config::SinkConfig;

// =============================================================================
// CLIENT DISPATCH
// =============================================================================

/// Concrete sink chosen by `REGISTRATION_SINK`.
pub enum SinkClient {
    Simulated(simulated::SimulatedSink),
    Webhook(webhook::WebhookSink),
    Email(email::EmailSink),
}

impl SinkClient {
    /// Build the configured sink.
    ///
    /// # Errors
    ///
    /// Returns an error if the webhook HTTP client fails to build.
    pub fn from_config(config: &SinkConfig) -> Result<Self, SinkError> {
        let client = match config {
            SinkConfig::Simulated { delay, failure, sender } => {
                let sink = match failure {
                    Some(message) => simulated::SimulatedSink::failing(*delay, message.clone()),
                    None => simulated::SimulatedSink::new(*delay),
                };
                Self::Simulated(sink.with_sender(sender.clone()))
            }
            SinkConfig::Webhook { url, timeouts } => Self::Webhook(webhook::WebhookSink::new(url.clone(), *timeouts)?),
            SinkConfig::Email { api_key, from, sender } => {
                Self::Email(email::EmailSink::new(api_key, from.clone(), sender.clone()))
            }
        };
        Ok(client)
    }

    /// Short name for logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Simulated(_) => "simulated",
            Self::Webhook(_) => "webhook",
            Self::Email(_) => "email",
        }
    }
}

#[async_trait::async_trait]
impl RegistrationSink for SinkClient {
    async fn register(&self, registration: &Registration) -> Result<(), SinkError> {
        match self {
            Self::Simulated(s) => s.register(registration).await,
            Self::Webhook(s) => s.register(registration).await,
            Self::Email(s) => s.register(registration).await,
        }
    }
}
