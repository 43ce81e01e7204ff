use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;
use mfolio_connect::{BrokerApiClient, HoldingsSyncService, HoldingsSyncServiceTrait, KiteApiClient};
use mfolio_core::{
    classification::ClassificationRules,
    funds::Account,
    portfolio::valuation::{ValuationService, ValuationServiceTrait},
    snapshots::SnapshotRepositoryTrait,
};
use mfolio_market_data::{AmfiNavProvider, NavFeedProvider};
use mfolio_storage_fs::SnapshotRepository;

pub struct AppState {
    pub valuation_service: Arc<dyn ValuationServiceTrait>,
    pub holdings_sync_service: Arc<dyn HoldingsSyncServiceTrait>,
}

pub fn init_tracing() {
    let log_format = std::env::var("MF_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

/// Classification rules from `MF_CLASSIFICATION_RULES`, or the built-in table.
pub fn load_classification_rules(config: &Config) -> anyhow::Result<ClassificationRules> {
    match &config.classification_rules {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading classification rules {}", path.display()))?;
            let rules = ClassificationRules::from_json(&json)?;
            tracing::info!(
                "Loaded {} classification rules from {}",
                rules.rules().len(),
                path.display()
            );
            Ok(rules)
        }
        None => Ok(ClassificationRules::default()),
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    tracing::info!("Snapshot directory in use: {}", config.data_dir.display());
    let snapshot_repository: Arc<dyn SnapshotRepositoryTrait> =
        Arc::new(SnapshotRepository::new(config.data_dir.clone()));

    let nav_feed: Arc<dyn NavFeedProvider> = Arc::new(AmfiNavProvider::new());
    let valuation_service = Arc::new(ValuationService::new(
        snapshot_repository.clone(),
        nav_feed,
    ));

    let brokers: HashMap<Account, Arc<dyn BrokerApiClient>> = Account::ALL
        .into_iter()
        .map(|account| {
            let client: Arc<dyn BrokerApiClient> =
                Arc::new(KiteApiClient::new(config.credentials(account).clone()));
            (account, client)
        })
        .collect();
    let rules = load_classification_rules(config)?;
    let holdings_sync_service = Arc::new(HoldingsSyncService::new(
        brokers,
        rules,
        snapshot_repository,
    ));

    Ok(Arc::new(AppState {
        valuation_service,
        holdings_sync_service,
    }))
}
