//! AMFI provider for daily mutual fund NAVs.
//!
//! AMFI publishes one flat, semicolon-delimited text file with the latest NAV
//! of every scheme. The whole file is downloaded for each valuation.

use async_trait::async_trait;
use log::debug;
use reqwest::Client;

use crate::errors::MarketDataError;
use crate::provider::NavFeedProvider;

/// Public URL of the AMFI daily NAV catalog.
pub const AMFI_NAV_URL: &str = "https://portal.amfiindia.com/spages/NAVAll.txt";

/// Provider ID constant
const PROVIDER_ID: &str = "AMFI";

/// Fetches the AMFI NAV catalog.
///
/// # Example
///
/// ```ignore
/// use mfolio_market_data::{AmfiNavProvider, NavFeedProvider};
///
/// let provider = AmfiNavProvider::new();
/// let lines = provider.fetch_lines().await?;
/// ```
pub struct AmfiNavProvider {
    client: Client,
    url: String,
}

impl AmfiNavProvider {
    /// Create a provider reading the public AMFI catalog.
    pub fn new() -> Self {
        Self::with_url(AMFI_NAV_URL)
    }

    /// Create a provider reading the catalog from another location.
    pub fn with_url(url: &str) -> Self {
        // Transport defaults only; idle connections are not kept between valuations.
        let client = Client::builder()
            .pool_max_idle_per_host(0)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            url: url.to_string(),
        }
    }

    /// The catalog location this provider reads.
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Default for AmfiNavProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// Split a catalog body into lines, accepting both `\n` and `\r\n` endings.
fn split_lines(body: &str) -> Vec<String> {
    body.lines().map(str::to_string).collect()
}

#[async_trait]
impl NavFeedProvider for AmfiNavProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn fetch_lines(&self) -> Result<Vec<String>, MarketDataError> {
        debug!("[Amfi] GET {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| MarketDataError::UpstreamUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(MarketDataError::UpstreamUnavailable(format!(
                "HTTP {} from {}",
                status, self.url
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| MarketDataError::UpstreamUnreadable(e.to_string()))?;

        let lines = split_lines(&body);
        debug!("[Amfi] Received {} catalog lines", lines.len());
        Ok(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_id() {
        let provider = AmfiNavProvider::new();
        assert_eq!(provider.id(), "AMFI");
    }

    #[test]
    fn test_default_url_is_public_catalog() {
        let provider = AmfiNavProvider::default();
        assert_eq!(provider.url(), AMFI_NAV_URL);
    }

    #[test]
    fn test_split_lines_handles_crlf() {
        let lines = split_lines("a;b\r\nc;d\n\ne;f");
        assert_eq!(lines, vec!["a;b", "c;d", "", "e;f"]);
    }

    #[tokio::test]
    async fn test_unreachable_feed_is_unavailable() {
        // Port 9 (discard) on loopback is not expected to accept HTTP connections.
        let provider = AmfiNavProvider::with_url("http://127.0.0.1:9/NAVAll.txt");
        let err = provider.fetch_lines().await.unwrap_err();
        assert!(matches!(err, MarketDataError::UpstreamUnavailable(_)));
    }
}
