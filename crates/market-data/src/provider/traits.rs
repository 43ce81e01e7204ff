//! NAV feed provider trait definition.

use async_trait::async_trait;

use crate::errors::MarketDataError;

/// Source of the daily NAV catalog.
///
/// Implementations fetch the whole catalog on every call and return it
/// split into lines. No caching and no retries.
#[async_trait]
pub trait NavFeedProvider: Send + Sync {
    /// Identifier used in log lines.
    fn id(&self) -> &'static str;

    /// Fetch the catalog and return its lines.
    ///
    /// # Errors
    ///
    /// - [`MarketDataError::UpstreamUnavailable`] on a network error or a
    ///   non-2xx status
    /// - [`MarketDataError::UpstreamUnreadable`] when the body cannot be read
    async fn fetch_lines(&self) -> Result<Vec<String>, MarketDataError>;
}
