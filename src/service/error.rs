//! Errors surfaced by the todo service.

use thiserror::Error;

use crate::infrastructure::RepositoryError;

/// Field-level error for validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Name of the field that failed validation.
    pub field: String,
    /// Error message for this field.
    pub message: String,
}

impl FieldError {
    /// Creates a new field error.
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Input rejected before reaching storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Field-level errors.
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    /// Creates a new validation error.
    #[must_use]
    pub const fn new(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }

    /// Creates a validation error with a single field error.
    #[must_use]
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(vec![FieldError::new(field, message)])
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut separator = "";
        for error in &self.errors {
            write!(formatter, "{separator}{}: {}", error.field, error.message)?;
            separator = "; ";
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Failure of a todo operation.
///
/// Malformed identifiers and identifiers with no matching record are both
/// reported as `NotFound`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TodoError {
    /// No todo matches the given identifier.
    #[error("Todo not found: {0}")]
    NotFound(String),

    /// The request failed validation.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// The storage layer failed.
    #[error(transparent)]
    Storage(#[from] RepositoryError),
}
