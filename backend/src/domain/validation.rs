//! Explicit input validation.
//!
//! Input types implement [`Validate`] and collect every failing field into
//! [`ValidationErrors`] instead of stopping at the first problem. The
//! aggregate converts into an [`Error`] with code `invalid_request` and a
//! `details.errors` array of `{field, code, message}` objects.

use std::fmt;

use serde::Serialize;
use serde_json::json;

use super::Error;

/// A single failing field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Input field name as exposed to clients (camelCase).
    pub field: String,
    /// Stable machine-readable reason.
    pub code: &'static str,
    /// Human-readable explanation.
    pub message: String,
}

/// Accumulated validation failures for one input value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    /// Start with no failures.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure.
    pub fn push(&mut self, field: impl Into<String>, code: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.into(),
            code,
            message: message.into(),
        });
    }

    /// Failures recorded so far.
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Whether no failures were recorded.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Whether `field` failed.
    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|error| error.field == field)
    }

    /// `Ok(())` when empty, otherwise `Err(self)`.
    pub fn finish(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }

    /// Require non-blank text of at most `max` characters.
    pub fn text(&mut self, field: &str, value: &str, max: usize) {
        if value.trim().is_empty() {
            self.push(field, "required", format!("{field} must not be blank"));
        } else if value.chars().count() > max {
            self.push(field, "too_long", format!("{field} must be at most {max} characters"));
        }
    }

    /// Like [`Self::text`] but tolerates an absent value.
    pub fn optional_text(&mut self, field: &str, value: Option<&str>, max: usize) {
        if let Some(text) = value {
            self.text(field, text, max);
        }
    }

    /// Require `min <= value <= max`.
    pub fn range<T>(&mut self, field: &str, value: T, min: T, max: T)
    where
        T: PartialOrd + fmt::Display,
    {
        if value < min || value > max {
            self.push(
                field,
                "out_of_range",
                format!("{field} must be between {min} and {max}, got {value}"),
            );
        }
    }

    /// Record an `empty_update` failure when `no_changes` holds.
    pub fn require_changes(&mut self, no_changes: bool) {
        if no_changes {
            self.push("body", "empty_update", "at least one field must be provided");
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.errors.iter().map(|error| error.field.as_str()).collect();
        write!(f, "invalid fields: {}", fields.join(", "))
    }
}

impl std::error::Error for ValidationErrors {}

impl From<ValidationErrors> for Error {
    fn from(value: ValidationErrors) -> Self {
        Error::invalid_request("request validation failed")
            .with_details(json!({ "errors": value.errors }))
    }
}

/// Implemented by input types checked before reaching a repository.
pub trait Validate {
    /// Collect every failing field.
    fn validate(&self) -> Result<(), ValidationErrors>;
}
