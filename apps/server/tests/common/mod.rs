#![allow(dead_code)]

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{HeaderMap, Request, StatusCode},
    Router,
};
use tower::ServiceExt;

use mfolio_connect::{BrokerApiClient, HoldingsSyncService, KiteApiClient};
use mfolio_core::{
    classification::ClassificationRules,
    funds::Account,
    portfolio::valuation::ValuationService,
    snapshots::SnapshotRepositoryTrait,
};
use mfolio_market_data::{MarketDataError, NavFeedProvider};
use mfolio_server::{api::app_router, config::Config, AppState};
use mfolio_storage_fs::SnapshotRepository;

/// NAV feed serving fixed lines, or failing when `lines` is `None`.
pub struct StubNavFeed {
    lines: Option<Vec<String>>,
    pub calls: AtomicUsize,
}

impl StubNavFeed {
    pub fn with_lines(lines: &[&str]) -> Self {
        Self {
            lines: Some(lines.iter().map(|l| l.to_string()).collect()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            lines: None,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl NavFeedProvider for StubNavFeed {
    fn id(&self) -> &'static str {
        "STUB"
    }

    async fn fetch_lines(&self) -> Result<Vec<String>, MarketDataError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.lines
            .clone()
            .ok_or_else(|| MarketDataError::UpstreamUnavailable("HTTP 503".to_string()))
    }
}

pub fn config(data_dir: &Path, static_dir: &Path) -> Config {
    let mut vars: HashMap<&str, String> = HashMap::new();
    vars.insert("EQ_KITE_API_KEY", "eq-key".to_string());
    vars.insert("EQ_KITE_API_SECRET", "eq-secret".to_string());
    vars.insert("DEBT_KITE_API_KEY", "debt-key".to_string());
    vars.insert("DEBT_KITE_API_SECRET", "debt-secret".to_string());
    vars.insert("MF_DATA_DIR", data_dir.display().to_string());
    vars.insert("MF_STATIC_DIR", static_dir.display().to_string());
    Config::from_lookup(|key: &str| vars.get(key).cloned()).unwrap()
}

/// Router over `data_dir` with a stubbed NAV feed and Kite clients pointed
/// at `kite_api_url`.
pub fn app(config: &Config, nav_feed: Arc<StubNavFeed>, kite_api_url: &str) -> Router {
    let snapshot_repository: Arc<dyn SnapshotRepositoryTrait> =
        Arc::new(SnapshotRepository::new(config.data_dir.clone()));

    let brokers: HashMap<Account, Arc<dyn BrokerApiClient>> = Account::ALL
        .into_iter()
        .map(|account| {
            let client: Arc<dyn BrokerApiClient> = Arc::new(KiteApiClient::with_base_url(
                config.credentials(account).clone(),
                kite_api_url,
            ));
            (account, client)
        })
        .collect();

    let state = Arc::new(AppState {
        valuation_service: Arc::new(ValuationService::new(
            snapshot_repository.clone(),
            nav_feed,
        )),
        holdings_sync_service: Arc::new(HoldingsSyncService::new(
            brokers,
            ClassificationRules::default(),
            snapshot_repository,
        )),
    });
    app_router(state, config)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, HeaderMap, String) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, headers, String::from_utf8(body.to_vec()).unwrap())
}

pub fn write_snapshot(dir: &Path, file_name: &str, json: &str) {
    std::fs::write(dir.join(file_name), json).unwrap();
}
