//! Traits defining the contract for broker operations.

use async_trait::async_trait;

use mfolio_core::errors::Result;
use mfolio_core::funds::{Account, RawHolding};

/// Trait for talking to one broker login.
///
/// An implementation is bound to the API key and secret of a single
/// account.
#[async_trait]
pub trait BrokerApiClient: Send + Sync {
    /// URL the user is redirected to for the broker's login page.
    fn login_url(&self) -> String;

    /// Exchange `request_token` for an access token and list the mutual
    /// fund holdings visible to it.
    async fn list_holdings(&self, request_token: &str) -> Result<Vec<RawHolding>>;
}

/// Trait for the login-to-snapshot pipeline.
#[async_trait]
pub trait HoldingsSyncServiceTrait: Send + Sync {
    /// Broker login URL for an account.
    fn login_url(&self, account: Account) -> Result<String>;

    /// Fetch, classify and save the holdings of `account`. Returns the
    /// number of funds written to its snapshot.
    async fn sync_account(&self, account: Account, request_token: &str) -> Result<usize>;
}
