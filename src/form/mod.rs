//! Registration form — fields, validation, submission, and modal lifecycle.
//!
//! ARCHITECTURE
//! ============
//! `fields` and `validate` are pure data and rules. `controller` owns one
//! modal session's state and talks to the injected sink. `modal` layers
//! open/dismiss behavior on top. Rendering is left to the caller.

pub mod controller;
pub mod fields;
pub mod modal;
pub mod validate;

pub use controller::{FormController, SubmissionState, SubmitOutcome, SubmitRejected};
pub use fields::{Field, FormFields, UnknownField};
pub use modal::{DismissReason, RegistrationModal};
pub use validate::{FieldError, ValidationErrors, validate};
