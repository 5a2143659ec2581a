//! Simulated sink — logs the confirmation and waits a fixed delay.
//!
//! Stands in for a backend during local runs and demos. A configured
//! failure message makes every call fail, which is how the failure path of
//! the form is exercised without a network.

use std::time::Duration;

use super::confirmation::{Confirmation, Sender};
use super::types::{Registration, RegistrationSink, SinkError};

pub const DEFAULT_SIMULATED_DELAY_MS: u64 = 1500;

pub struct SimulatedSink {
    delay: Duration,
    failure: Option<String>,
    sender: Sender,
}

impl SimulatedSink {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self { delay, failure: None, sender: Sender::default() }
    }

    /// Every registration fails with `message` after the delay.
    #[must_use]
    pub fn failing(delay: Duration, message: impl Into<String>) -> Self {
        Self { delay, failure: Some(message.into()), sender: Sender::default() }
    }

    #[must_use]
    pub fn with_sender(mut self, sender: Sender) -> Self {
        self.sender = sender;
        self
    }
}

impl Default for SimulatedSink {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_SIMULATED_DELAY_MS))
    }
}

#[async_trait::async_trait]
impl RegistrationSink for SimulatedSink {
    async fn register(&self, registration: &Registration) -> Result<(), SinkError> {
        let confirmation = Confirmation::new(registration, &self.sender);
        tracing::info!(
            to_email = %confirmation.to_email,
            to_name = %confirmation.to_name,
            from_name = %confirmation.from_name,
            message = %confirmation.message,
            "simulated registration"
        );

        tokio::time::sleep(self.delay).await;

        match &self.failure {
            Some(message) => Err(SinkError::Simulated(message.clone())),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
#[path = "simulated_test.rs"]
mod tests;
