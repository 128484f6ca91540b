//! Shared Error Types
//!
//! This module defines error types that are shared between request parsing
//! and the backend handlers. These errors represent common failure cases
//! that occur while turning untrusted input into domain values.
//!
//! # Error Categories
//!
//! - `ValidationError` - A request field failed a validation rule
//! - `UnknownVariant` - A string did not name any variant of a fixed enumeration
//!
//! # Usage
//!
//! ```rust
//! use skillforge::shared::error::SharedError;
//!
//! let error = SharedError::validation("email", "Please provide a valid email");
//! ```
use serde::Serialize;
use thiserror::Error;

/// Shared error types raised while validating input
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// Data validation error
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },

    /// A value outside a fixed enumeration (track, status, role)
    #[error("Unknown {kind}: '{value}'")]
    UnknownVariant {
        /// Which enumeration was being parsed
        kind: &'static str,
        /// The rejected input
        value: String,
    },
}

impl SharedError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new unknown-variant error
    pub fn unknown_variant(kind: &'static str, value: impl Into<String>) -> Self {
        Self::UnknownVariant {
            kind,
            value: value.into(),
        }
    }
}

/// One field-level validation failure, as reported in the `errors` array
/// of a 400 response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<SharedError> for FieldError {
    fn from(err: SharedError) -> Self {
        match err {
            SharedError::ValidationError { field, message } => FieldError { field, message },
            SharedError::UnknownVariant { kind, value } => FieldError {
                field: kind.to_string(),
                message: format!("Invalid {} '{}'", kind, value),
            },
        }
    }
}

/// Accumulates field errors so a handler can report every problem with a
/// request body at once.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `message` against `field` unless `ok` holds.
    pub fn check(&mut self, ok: bool, field: &str, message: &str) -> &mut Self {
        if !ok {
            self.errors.push(FieldError::new(field, message));
        }
        self
    }

    pub fn push(&mut self, error: impl Into<FieldError>) -> &mut Self {
        self.errors.push(error.into());
        self
    }

    /// `Ok(())` when nothing was recorded, otherwise every collected error.
    pub fn finish(self) -> Result<(), Vec<FieldError>> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

/// Loose structural email check: one `@`, non-empty local part, a dotted
/// domain and no whitespace.
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && tld.len() >= 2,
        None => false,
    }
}
