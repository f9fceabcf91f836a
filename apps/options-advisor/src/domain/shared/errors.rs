//! Domain errors for the advisory core.

use thiserror::Error;

/// Domain-level errors raised when constructing or mutating domain objects.
///
/// Advisory findings (risk warnings, exit recommendations) are data, not errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Invalid value for a field.
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue {
        /// Field name.
        field: String,
        /// Error message.
        message: String,
    },

    /// Invalid state transition attempted.
    #[error("Invalid state transition for {entity}: {from} -> {to}")]
    InvalidStateTransition {
        /// Entity type (e.g., "Position").
        entity: String,
        /// Current state.
        from: String,
        /// Attempted state.
        to: String,
    },
}

impl DomainError {
    pub(crate) fn invalid(field: &str, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.to_string(),
            message: message.into(),
        }
    }
}
