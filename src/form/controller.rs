//! Form controller — fields, validation errors, and the submission lifecycle.
//!
//! DESIGN
//! ======
//! All operations take `&self` so a presentation layer can edit fields while
//! a submission is awaiting the sink. Mutable state lives behind a
//! `std::sync::Mutex` that is never held across an await; the submission
//! state is published through a `watch` channel so observers can react to
//! transitions without polling.
//!
//! Each attempt gets a `Uuid`. `reset()` forgets which attempt's result is
//! wanted, so a sink call that completes after a reset is recognised as stale
//! and its result is dropped instead of overwriting the fresh session. The
//! sink call itself is still tracked until it returns: no new attempt may
//! reach the sink while an earlier one is running, even after a reset.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::watch;
use uuid::Uuid;

use super::fields::{Field, FormFields, UnknownField};
use super::validate::{ValidationErrors, validate};
use crate::config::DEFAULT_CLOSE_DELAY_MS;
use crate::sink::{Registration, RegistrationSink};

// =============================================================================
// STATE & OUTCOMES
// =============================================================================

/// Lifecycle of the current submission attempt.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed(String),
}

impl SubmissionState {
    /// `Succeeded` or `Failed`: the last attempt has completed.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed(_))
    }
}

/// How an accepted submission ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Succeeded,
    Failed(String),
    /// `reset()` ran while the sink call was in flight; its result was dropped.
    Discarded,
}

/// Submission refused before the sink was called. State is unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitRejected {
    #[error("form has {} invalid field(s)", .0.len())]
    ValidationFailed(ValidationErrors),
    #[error("a submission is already in progress")]
    AlreadyInProgress,
}

// =============================================================================
// CONTROLLER
// =============================================================================

pub struct FormController<S> {
    sink: S,
    inner: Mutex<Inner>,
    state: watch::Sender<SubmissionState>,
    close_delay: Duration,
}

#[derive(Default)]
struct Inner {
    fields: FormFields,
    errors: ValidationErrors,
    /// Attempt whose result is still wanted. Cleared by `reset()`.
    in_flight: Option<Uuid>,
    /// Attempt whose sink call has not returned yet. Survives `reset()`.
    running: Option<Uuid>,
    /// Attempt that produced the current `Succeeded` state.
    succeeded: Option<Uuid>,
}

impl<S: RegistrationSink> FormController<S> {
    #[must_use]
    pub fn new(sink: S) -> Self {
        let (state, _) = watch::channel(SubmissionState::Idle);
        Self {
            sink,
            inner: Mutex::new(Inner::default()),
            state,
            close_delay: Duration::from_millis(DEFAULT_CLOSE_DELAY_MS),
        }
    }

    /// Delay between a successful submission and the settle signal.
    #[must_use]
    pub fn with_close_delay(mut self, close_delay: Duration) -> Self {
        self.close_delay = close_delay;
        self
    }

    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // -------------------------------------------------------------------------
    // Snapshots
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn fields(&self) -> FormFields {
        self.lock().fields.clone()
    }

    #[must_use]
    pub fn errors(&self) -> ValidationErrors {
        self.lock().errors.clone()
    }

    #[must_use]
    pub fn state(&self) -> SubmissionState {
        self.state.borrow().clone()
    }

    /// Receiver that observes every state transition.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SubmissionState> {
        self.state.subscribe()
    }

    // -------------------------------------------------------------------------
    // Editing & validation
    // -------------------------------------------------------------------------

    /// Update one field. Allowed in every state; an in-flight submission
    /// keeps the values it captured.
    pub fn set_field(&self, field: Field, value: impl Into<String>) {
        self.lock().fields.set(field, value);
    }

    /// Update a field addressed by name (`username`, `email`, `identifier`/`prn`, `password`).
    pub fn set_field_named(&self, name: &str, value: impl Into<String>) -> Result<(), UnknownField> {
        let field = name.parse::<Field>()?;
        self.set_field(field, value);
        Ok(())
    }

    /// Validate the current fields without storing anything.
    #[must_use]
    pub fn validate(&self) -> ValidationErrors {
        validate(&self.lock().fields)
    }

    /// Validate and keep the result as the current errors.
    pub fn refresh_errors(&self) -> ValidationErrors {
        let mut inner = self.lock();
        inner.errors = validate(&inner.fields);
        inner.errors.clone()
    }

    // -------------------------------------------------------------------------
    // Submission
    // -------------------------------------------------------------------------

    /// Validate and hand a snapshot of the fields to the sink.
    ///
    /// # Errors
    ///
    /// `AlreadyInProgress` while another attempt's sink call is running,
    /// including one left behind by `reset()`;
    /// `ValidationFailed` when any field is invalid (the errors are stored).
    pub async fn submit(&self) -> Result<SubmitOutcome, SubmitRejected> {
        let (attempt_id, registration) = {
            let mut inner = self.lock();
            if inner.running.is_some() || *self.state.borrow() == SubmissionState::Submitting {
                tracing::debug!("submit ignored: already in progress");
                return Err(SubmitRejected::AlreadyInProgress);
            }

            let errors = validate(&inner.fields);
            if !errors.is_empty() {
                tracing::debug!(invalid = errors.len(), "submit rejected by validation");
                inner.errors = errors.clone();
                return Err(SubmitRejected::ValidationFailed(errors));
            }

            let attempt_id = Uuid::new_v4();
            inner.errors = ValidationErrors::new();
            inner.in_flight = Some(attempt_id);
            inner.running = Some(attempt_id);
            inner.succeeded = None;
            self.state.send_replace(SubmissionState::Submitting);
            (attempt_id, Registration::from(&inner.fields))
        };

        tracing::info!(%attempt_id, username = %registration.username, "registration submitting");
        let result = self.sink.register(&registration).await;

        let mut inner = self.lock();
        if inner.running == Some(attempt_id) {
            inner.running = None;
        }
        if inner.in_flight != Some(attempt_id) {
            tracing::info!(%attempt_id, "registration completed after reset, result dropped");
            return Ok(SubmitOutcome::Discarded);
        }
        inner.in_flight = None;

        match result {
            Ok(()) => {
                inner.fields.clear();
                inner.succeeded = Some(attempt_id);
                self.state.send_replace(SubmissionState::Succeeded);
                tracing::info!(%attempt_id, "registration succeeded");
                Ok(SubmitOutcome::Succeeded)
            }
            Err(e) => {
                let message = e.to_string();
                tracing::warn!(%attempt_id, error = %e, "registration failed");
                self.state.send_replace(SubmissionState::Failed(message.clone()));
                Ok(SubmitOutcome::Failed(message))
            }
        }
    }

    /// Resolve once a success has been visible for the close delay.
    ///
    /// Returns `false` if the state changed in the meantime, including a
    /// reset followed by a newer success.
    pub async fn settled(&self) -> bool {
        let mut rx = self.state.subscribe();
        if rx.wait_for(|s| *s == SubmissionState::Succeeded).await.is_err() {
            return false;
        }
        let Some(attempt_id) = self.lock().succeeded else {
            return false;
        };
        tokio::time::sleep(self.close_delay).await;
        let unchanged = !rx.has_changed().unwrap_or(true);
        unchanged && self.lock().succeeded == Some(attempt_id)
    }

    /// Back to an empty, idle form.
    pub fn reset(&self) {
        let mut inner = self.lock();
        if let Some(attempt_id) = inner.in_flight.take() {
            tracing::debug!(%attempt_id, "reset while submitting");
        }
        inner.succeeded = None;
        inner.fields.clear();
        inner.errors = ValidationErrors::new();
        self.state.send_replace(SubmissionState::Idle);
    }
}

#[cfg(test)]
#[path = "controller_test.rs"]
mod tests;
