//! Pricing Errors

use thiserror::Error;

/// Errors raised by the pricing core.
///
/// Numerical non-convergence is deliberately absent: the IV solver reports it
/// on its result instead of failing.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PricingError {
    /// A market parameter is outside its valid domain.
    #[error("Invalid parameter {field}: {message} (got {value})")]
    InvalidParameter {
        /// Parameter name.
        field: &'static str,
        /// Offending value.
        value: f64,
        /// Constraint that was violated.
        message: &'static str,
    },

    /// An expiry string did not match `DD-MMM-YYYY`.
    #[error("Invalid expiry date format '{input}': {reason}")]
    InvalidDateFormat {
        /// Raw input.
        input: String,
        /// What was wrong with it.
        reason: String,
    },
}

impl PricingError {
    pub(crate) const fn invalid(field: &'static str, value: f64, message: &'static str) -> Self {
        Self::InvalidParameter {
            field,
            value,
            message,
        }
    }

    pub(crate) fn bad_date(input: &str, reason: impl Into<String>) -> Self {
        Self::InvalidDateFormat {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}
