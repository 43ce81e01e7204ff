//! Service turning a broker login into a saved holdings snapshot.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info};

use mfolio_core::classification::ClassificationRules;
use mfolio_core::errors::{Error, Result};
use mfolio_core::funds::Account;
use mfolio_core::snapshots::SnapshotRepositoryTrait;

use super::traits::{BrokerApiClient, HoldingsSyncServiceTrait};

/// Fetches, classifies and persists the holdings of each broker account.
pub struct HoldingsSyncService {
    brokers: HashMap<Account, Arc<dyn BrokerApiClient>>,
    rules: ClassificationRules,
    snapshot_repository: Arc<dyn SnapshotRepositoryTrait>,
}

impl HoldingsSyncService {
    pub fn new(
        brokers: HashMap<Account, Arc<dyn BrokerApiClient>>,
        rules: ClassificationRules,
        snapshot_repository: Arc<dyn SnapshotRepositoryTrait>,
    ) -> Self {
        Self {
            brokers,
            rules,
            snapshot_repository,
        }
    }

    fn broker(&self, account: Account) -> Result<&Arc<dyn BrokerApiClient>> {
        self.brokers.get(&account).ok_or_else(|| {
            Error::ConfigMissing(format!("broker credentials for {} account", account))
        })
    }
}

#[async_trait]
impl HoldingsSyncServiceTrait for HoldingsSyncService {
    fn login_url(&self, account: Account) -> Result<String> {
        Ok(self.broker(account)?.login_url())
    }

    async fn sync_account(&self, account: Account, request_token: &str) -> Result<usize> {
        if request_token.trim().is_empty() {
            return Err(Error::BadRequest("missing request_token".to_string()));
        }
        let broker = self.broker(account)?;

        let holdings = broker.list_holdings(request_token).await?;
        debug!(
            "[HoldingsSync] {} holdings fetched for {} account",
            holdings.len(),
            account
        );

        let funds = self.rules.classify(account, holdings);
        self.snapshot_repository.save(account, &funds)?;

        info!(
            "[HoldingsSync] Saved {} funds for {} account",
            funds.len(),
            account
        );
        Ok(funds.len())
    }
}
