//! Crate-level error type.
//!
//! Each bounded context raises its own `thiserror` enum; [`AdvisorError`]
//! wraps them for callers that cross contexts (use cases, the binary) and
//! maps every failure to a stable [`ErrorCode`].
//!
//! | Reason | Raised when |
//! |--------|-------------|
//! | `INVALID_PARAMETER` | Pricing input outside its domain |
//! | `INVALID_DATE_FORMAT` | Expiry not in `DD-MMM-YYYY` form |
//! | `INVALID_VALUE` | Domain object rejected a value |
//! | `INVALID_STATE_TRANSITION` | Lifecycle change not allowed |
//! | `SYMBOL_NOT_FOUND` / `CONTRACT_NOT_FOUND` | Quote source has no data |
//! | `QUOTE_UNAVAILABLE` | Quote source failed |
//! | `POSITION_NOT_FOUND` / `NOT_OWNER` | Watchlist lookups |
//! | `STORAGE_ERROR` | Watchlist backend failed |
//! | `UNKNOWN_INSTRUMENT` | No lot size configured for the underlying |
//! | `CONFIG_ERROR` | Configuration unreadable or invalid |

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::ports::{QuoteError, RepositoryError};
use crate::config::ConfigError;
use crate::domain::shared::DomainError;
use crate::pricing::PricingError;

/// Error codes for the advisor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Input errors
    /// Pricing parameter outside its valid domain.
    InvalidParameter,
    /// Malformed expiry string.
    InvalidDateFormat,
    /// Domain value rejected.
    InvalidValue,
    /// Lifecycle transition rejected.
    InvalidStateTransition,
    /// Underlying has no instrument configuration.
    UnknownInstrument,

    // Lookup errors
    /// Quote source does not know the underlying.
    SymbolNotFound,
    /// Quote source has no quote for the contract.
    ContractNotFound,
    /// Watchlist has no such position.
    PositionNotFound,
    /// Position belongs to another user.
    NotOwner,

    // Infrastructure errors
    /// Quote source failure.
    QuoteUnavailable,
    /// Watchlist storage failure.
    StorageError,
    /// Configuration failure.
    ConfigError,
}

impl ErrorCode {
    /// Get the error reason string.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::InvalidParameter => "INVALID_PARAMETER",
            Self::InvalidDateFormat => "INVALID_DATE_FORMAT",
            Self::InvalidValue => "INVALID_VALUE",
            Self::InvalidStateTransition => "INVALID_STATE_TRANSITION",
            Self::UnknownInstrument => "UNKNOWN_INSTRUMENT",
            Self::SymbolNotFound => "SYMBOL_NOT_FOUND",
            Self::ContractNotFound => "CONTRACT_NOT_FOUND",
            Self::PositionNotFound => "POSITION_NOT_FOUND",
            Self::NotOwner => "NOT_OWNER",
            Self::QuoteUnavailable => "QUOTE_UNAVAILABLE",
            Self::StorageError => "STORAGE_ERROR",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }

    /// Whether retrying the same request could succeed.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::QuoteUnavailable | Self::StorageError)
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.reason())
    }
}

/// Any failure surfaced by the advisor.
#[derive(Debug, Error)]
pub enum AdvisorError {
    /// Pricing failure.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// Domain rule violation.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Quote source failure.
    #[error(transparent)]
    Quote(#[from] QuoteError),

    /// Watchlist failure.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// Configuration failure.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Underlying without instrument configuration.
    #[error("Unknown instrument: {symbol}")]
    UnknownInstrument {
        /// The underlying.
        symbol: String,
    },
}

impl AdvisorError {
    /// Stable code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Pricing(PricingError::InvalidParameter { .. }) => ErrorCode::InvalidParameter,
            Self::Pricing(PricingError::InvalidDateFormat { .. }) => ErrorCode::InvalidDateFormat,
            Self::Domain(DomainError::InvalidValue { .. })
            | Self::Repository(RepositoryError::Domain(DomainError::InvalidValue { .. })) => {
                ErrorCode::InvalidValue
            }
            Self::Domain(DomainError::InvalidStateTransition { .. })
            | Self::Repository(RepositoryError::Domain(
                DomainError::InvalidStateTransition { .. },
            )) => ErrorCode::InvalidStateTransition,
            Self::Quote(QuoteError::SymbolNotFound { .. }) => ErrorCode::SymbolNotFound,
            Self::Quote(QuoteError::ContractNotFound { .. }) => ErrorCode::ContractNotFound,
            Self::Quote(QuoteError::Unavailable { .. }) => ErrorCode::QuoteUnavailable,
            Self::Repository(RepositoryError::NotFound { .. }) => ErrorCode::PositionNotFound,
            Self::Repository(RepositoryError::NotOwner { .. }) => ErrorCode::NotOwner,
            Self::Repository(RepositoryError::Storage { .. }) => ErrorCode::StorageError,
            Self::Config(_) => ErrorCode::ConfigError,
            Self::UnknownInstrument { .. } => ErrorCode::UnknownInstrument,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_follow_source_variant() {
        let err: AdvisorError = "2025-11-28"
            .parse::<crate::pricing::ExpiryDate>()
            .unwrap_err()
            .into();
        assert_eq!(err.code(), ErrorCode::InvalidDateFormat);
        assert_eq!(err.code().reason(), "INVALID_DATE_FORMAT");

        let err: AdvisorError = RepositoryError::from(DomainError::InvalidStateTransition {
            entity: "Position p1".to_string(),
            from: "closed".to_string(),
            to: "closed".to_string(),
        })
        .into();
        assert_eq!(err.code(), ErrorCode::InvalidStateTransition);
    }

    #[test]
    fn transient_codes() {
        let err = AdvisorError::from(QuoteError::Unavailable {
            message: "timeout".to_string(),
        });
        assert!(err.code().is_transient());
        assert!(!ErrorCode::NotOwner.is_transient());
    }

    #[test]
    fn display_is_transparent() {
        let err = AdvisorError::from(QuoteError::SymbolNotFound {
            symbol: "FINNIFTY".to_string(),
        });
        assert_eq!(err.to_string(), "Symbol not found: FINNIFTY");

        let err = AdvisorError::UnknownInstrument {
            symbol: "SENSEX".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown instrument: SENSEX");
        assert_eq!(err.code().to_string(), "UNKNOWN_INSTRUMENT");
    }

    #[test]
    fn code_serializes_screaming_snake() {
        let json = serde_json::to_string(&ErrorCode::PositionNotFound).unwrap();
        assert_eq!(json, "\"POSITION_NOT_FOUND\"");
    }
}
