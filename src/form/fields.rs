//! Registration form fields.
//!
//! DESIGN
//! ======
//! `FormFields` is the editable record behind the modal. `Field` names each
//! attribute so the controller can address them without stringly-typed
//! lookups; the string form is only parsed at the presentation boundary.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// =============================================================================
// FIELD
// =============================================================================

/// One of the four registration inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Username,
    Email,
    /// The 10-digit PRN.
    Identifier,
    Password,
}

impl Field {
    /// All fields in display order.
    pub const ALL: [Field; 4] = [Field::Username, Field::Email, Field::Identifier, Field::Password];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::Email => "email",
            Self::Identifier => "identifier",
            Self::Password => "password",
        }
    }

    /// Human-facing label used by prompts.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Username => "Username",
            Self::Email => "Email Address",
            Self::Identifier => "PRN (10 digits)",
            Self::Password => "Password",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown form field: {0}")]
pub struct UnknownField(pub String);

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "username" => Ok(Self::Username),
            "email" => Ok(Self::Email),
            "identifier" | "prn" => Ok(Self::Identifier),
            "password" => Ok(Self::Password),
            _ => Err(UnknownField(s.to_owned())),
        }
    }
}

// =============================================================================
// FORM FIELDS
// =============================================================================

/// Current values of the registration form. Empty strings until edited.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormFields {
    pub username: String,
    pub email: String,
    pub identifier: String,
    pub password: String,
}

impl FormFields {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Username => &self.username,
            Field::Email => &self.email,
            Field::Identifier => &self.identifier,
            Field::Password => &self.password,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::Username => &mut self.username,
            Field::Email => &mut self.email,
            Field::Identifier => &mut self.identifier,
            Field::Password => &mut self.password,
        };
        *slot = value.into();
    }

    /// True when every field is the empty string.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        Field::ALL.iter().all(|f| self.get(*f).is_empty())
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

impl fmt::Debug for FormFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormFields")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("identifier", &self.identifier)
            .field("password", &redacted(&self.password))
            .finish()
    }
}

pub(crate) fn redacted(secret: &str) -> &'static str {
    if secret.is_empty() { "" } else { "<redacted>" }
}

#[cfg(test)]
#[path = "fields_test.rs"]
mod tests;
