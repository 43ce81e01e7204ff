//! Error types for the market data crate.

use thiserror::Error;

/// Errors that can occur while fetching or reading the NAV feed.
///
/// Nothing in this crate retries; every variant is terminal for the
/// valuation that triggered it.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The feed could not be reached, or answered with a non-2xx status.
    #[error("NAV feed unavailable: {0}")]
    UpstreamUnavailable(String),

    /// The feed answered but its body could not be read.
    #[error("NAV feed unreadable: {0}")]
    UpstreamUnreadable(String),

    /// No catalog line mentions the symbol.
    #[error("Symbol not found in NAV feed: {0}")]
    SymbolNotFound(String),

    /// The NAV field of the matching line is missing or not a number.
    #[error("Malformed NAV for {symbol}: {message}")]
    MalformedNav {
        /// The symbol whose line was matched
        symbol: String,
        /// What was wrong with the line
        message: String,
    },
}
