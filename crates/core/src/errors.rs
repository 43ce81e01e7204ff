//! Core error types for the mfolio application.
//!
//! Storage and broker specific failures are converted into these kinds by
//! the crates that produce them, so the HTTP layer only ever sees this type.

use thiserror::Error;

use mfolio_market_data::MarketDataError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the portfolio application.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Missing configuration key: {0}")]
    ConfigMissing(String),

    #[error("Could not generate broker session: {0}")]
    AuthRejected(String),

    #[error("Cannot get holdings: {0}")]
    HoldingsFetchFailed(String),

    #[error("{0}")]
    MarketData(#[from] MarketDataError),

    #[error("Malformed month '{0}', expected MM/YYYY")]
    MalformedDate(String),

    #[error("Failed to read snapshot: {0}")]
    SnapshotReadFailed(String),

    #[error("Failed to write snapshot: {0}")]
    SnapshotWriteFailed(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Amount out of range: {0}")]
    AmountOverflow(String),
}

/// Validation errors for user input and data parsing.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),
}

impl Error {
    /// Short tag used when the error is written to the process log.
    pub fn tag(&self) -> &'static str {
        match self {
            Error::ConfigMissing(_) => "config",
            Error::AuthRejected(_) => "auth_rejected",
            Error::HoldingsFetchFailed(_) => "holdings",
            Error::MarketData(MarketDataError::UpstreamUnavailable(_)) => "upstream_unavailable",
            Error::MarketData(MarketDataError::UpstreamUnreadable(_)) => "upstream_unreadable",
            Error::MarketData(MarketDataError::SymbolNotFound(_)) => "symbol_not_found",
            Error::MarketData(MarketDataError::MalformedNav { .. }) => "malformed_nav",
            Error::MalformedDate(_) => "malformed_date",
            Error::SnapshotReadFailed(_) => "snapshot_read",
            Error::SnapshotWriteFailed(_) => "snapshot_write",
            Error::BadRequest(_) => "bad_request",
            Error::Validation(_) => "validation",
            Error::AmountOverflow(_) => "amount_overflow",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_market_data_errors_keep_their_message() {
        let err: Error = MarketDataError::SymbolNotFound("ZZZ".to_string()).into();
        assert_eq!(err.to_string(), "Symbol not found in NAV feed: ZZZ");
        assert_eq!(err.tag(), "symbol_not_found");
    }

    #[test]
    fn test_malformed_date_display() {
        let err = Error::MalformedDate("2020-01".to_string());
        assert_eq!(err.to_string(), "Malformed month '2020-01', expected MM/YYYY");
        assert_eq!(err.tag(), "malformed_date");
    }

    #[test]
    fn test_validation_errors_convert_into_root() {
        let err: Error = ValidationError::MissingField("symbol".to_string()).into();
        assert_eq!(
            err.to_string(),
            "Input validation failed: Required field 'symbol' is missing"
        );
        assert_eq!(err.tag(), "validation");
    }

    #[test]
    fn test_amount_overflow_display() {
        let err = Error::AmountOverflow("equity total".to_string());
        assert_eq!(err.to_string(), "Amount out of range: equity total");
        assert_eq!(err.tag(), "amount_overflow");
    }
}
