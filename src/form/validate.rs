//! Per-field validation rules.
//!
//! Every field is checked on every pass and errors accumulate; a field's
//! verdict never depends on another field's value.

use std::collections::BTreeMap;

use super::fields::{Field, FormFields};

const IDENTIFIER_LEN: usize = 10;
const MIN_PASSWORD_LEN: usize = 8;

// =============================================================================
// FIELD ERROR
// =============================================================================

/// Why a single field is invalid. `Display` is the message shown under the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("required")]
    Required,
    #[error("no special characters allowed")]
    SpecialCharacters,
    #[error("invalid email")]
    InvalidEmail,
    #[error("must be exactly 10 digits")]
    NotTenDigits,
    #[error("minimum 8 characters")]
    TooShort,
}

// =============================================================================
// VALIDATION ERRORS
// =============================================================================

/// Field-to-error mapping produced by one validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<Field, FieldError>,
}

impl ValidationErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    #[must_use]
    pub fn get(&self, field: Field) -> Option<FieldError> {
        self.errors.get(&field).copied()
    }

    #[must_use]
    pub fn contains(&self, field: Field) -> bool {
        self.errors.contains_key(&field)
    }

    /// Message for `field`, if it is invalid.
    #[must_use]
    pub fn message(&self, field: Field) -> Option<String> {
        self.get(field).map(|e| e.to_string())
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, FieldError)> + '_ {
        self.errors.iter().map(|(f, e)| (*f, *e))
    }

    fn insert(&mut self, field: Field, error: FieldError) {
        self.errors.insert(field, error);
    }
}

// =============================================================================
// RULES
// =============================================================================

/// Check all four fields and collect every failure.
#[must_use]
pub fn validate(fields: &FormFields) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    for field in Field::ALL {
        if let Err(e) = check_field(field, fields.get(field)) {
            errors.insert(field, e);
        }
    }
    errors
}

/// Apply the rule for a single field.
pub fn check_field(field: Field, value: &str) -> Result<(), FieldError> {
    match field {
        Field::Username => check_username(value),
        Field::Email => check_email(value),
        Field::Identifier => check_identifier(value),
        Field::Password => check_password(value),
    }
}

fn check_username(value: &str) -> Result<(), FieldError> {
    if value.chars().all(is_js_whitespace) {
        return Err(FieldError::Required);
    }
    if !value.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(FieldError::SpecialCharacters);
    }
    Ok(())
}

fn check_email(value: &str) -> Result<(), FieldError> {
    if value.is_empty() {
        return Err(FieldError::Required);
    }
    if is_email_shape(value) { Ok(()) } else { Err(FieldError::InvalidEmail) }
}

/// `local@domain.tld`: no whitespace (BOM included), exactly one `@`, and a dot inside the
/// domain with at least one character on each side.
fn is_email_shape(value: &str) -> bool {
    if value.chars().any(is_js_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

fn check_identifier(value: &str) -> Result<(), FieldError> {
    if value.is_empty() {
        return Err(FieldError::Required);
    }
    if value.len() != IDENTIFIER_LEN || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FieldError::NotTenDigits);
    }
    Ok(())
}

fn check_password(value: &str) -> Result<(), FieldError> {
    if value.is_empty() {
        return Err(FieldError::Required);
    }
    if value.encode_utf16().count() < MIN_PASSWORD_LEN {
        return Err(FieldError::TooShort);
    }
    Ok(())
}

/// Whitespace as browsers see it: Unicode whitespace plus the byte-order mark.
fn is_js_whitespace(c: char) -> bool {
    c.is_whitespace() || c == '\u{FEFF}'
}

#[cfg(test)]
#[path = "validate_test.rs"]
mod tests;
