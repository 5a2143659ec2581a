//! Sink types — the registration snapshot, the sink capability, and errors.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::form::fields::{FormFields, redacted};

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by registration sinks. The `Display` text is what the
/// controller surfaces as `Failed(message)`.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// The request never produced a response (connect, timeout, TLS).
    #[error("registration request failed: {0}")]
    Request(String),

    /// The backend answered with a non-success status.
    #[error("registration rejected: status {status}")]
    Rejected { status: u16, body: String },

    /// The confirmation email could not be delivered.
    #[error("confirmation email failed: {0}")]
    Delivery(String),

    /// Configured failure from the simulated sink.
    #[error("{0}")]
    Simulated(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

// =============================================================================
// REGISTRATION
// =============================================================================

/// Field values captured when a submission starts. Later edits to the form
/// do not reach an in-flight attempt.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub identifier: String,
    pub password: String,
}

impl From<&FormFields> for Registration {
    fn from(fields: &FormFields) -> Self {
        Self {
            username: fields.username.clone(),
            email: fields.email.clone(),
            identifier: fields.identifier.clone(),
            password: fields.password.clone(),
        }
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("identifier", &self.identifier)
            .field("password", &redacted(&self.password))
            .finish()
    }
}

// =============================================================================
// SINK TRAIT
// =============================================================================

/// Anything that can durably record a registration.
///
/// The controller calls `register` once per attempt and neither inspects nor
/// retries the error.
#[async_trait::async_trait]
pub trait RegistrationSink: Send + Sync {
    async fn register(&self, registration: &Registration) -> Result<(), SinkError>;
}

#[async_trait::async_trait]
impl<T: RegistrationSink + ?Sized> RegistrationSink for Arc<T> {
    async fn register(&self, registration: &Registration) -> Result<(), SinkError> {
        (**self).register(registration).await
    }
}
