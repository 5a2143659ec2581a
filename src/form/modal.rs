//! Registration modal lifecycle around a [`FormController`].
//!
//! Opening or closing always resets the controller so each session starts
//! from an empty form.

use std::sync::atomic::{AtomicBool, Ordering};

use super::controller::{FormController, SubmissionState};
use crate::sink::RegistrationSink;

/// What the user did to close the modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissReason {
    Escape,
    Backdrop,
    /// Disabled while a submission is in flight.
    CloseButton,
}

pub struct RegistrationModal<S> {
    controller: FormController<S>,
    open: AtomicBool,
}

impl<S: RegistrationSink> RegistrationModal<S> {
    #[must_use]
    pub fn new(controller: FormController<S>) -> Self {
        Self { controller, open: AtomicBool::new(false) }
    }

    #[must_use]
    pub fn controller(&self) -> &FormController<S> {
        &self.controller
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }

    pub fn open(&self) {
        self.controller.reset();
        self.open.store(true, Ordering::SeqCst);
        tracing::debug!("registration modal opened");
    }

    /// Close the modal. Returns `false` when it was already closed or the
    /// close button was pressed mid-submission.
    pub fn dismiss(&self, reason: DismissReason) -> bool {
        if reason == DismissReason::CloseButton && self.controller.state() == SubmissionState::Submitting {
            return false;
        }
        if !self.close() {
            return false;
        }
        tracing::debug!(?reason, "registration modal dismissed");
        true
    }

    /// Wait for the controller's settle signal and close if the success is
    /// still showing. Returns whether this call closed the modal.
    pub async fn auto_close(&self) -> bool {
        if !self.controller.settled().await {
            return false;
        }
        let closed = self.close();
        if closed {
            tracing::debug!("registration modal closed after success");
        }
        closed
    }

    fn close(&self) -> bool {
        if !self.open.swap(false, Ordering::SeqCst) {
            return false;
        }
        self.controller.reset();
        true
    }
}

#[cfg(test)]
#[path = "modal_test.rs"]
mod tests;
