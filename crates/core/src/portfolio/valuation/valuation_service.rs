use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use log::{debug, warn};
use rust_decimal::Decimal;

use mfolio_market_data::{parse_nav, NavFeedProvider};

use crate::errors::{Error, Result};
use crate::funds::{Portfolio, PricedFund};
use crate::portfolio::allocation::{allocate, Allocation};
use crate::snapshots::SnapshotRepositoryTrait;
use crate::utils::time_utils::{months_elapsed_at, valuation_date_today};

/// Trait for the pricing and allocation service.
#[async_trait]
pub trait ValuationServiceTrait: Send + Sync {
    /// Values every persisted fund at today's NAV and returns the equity,
    /// debt and gold totals, in that order.
    async fn get_allocations(&self) -> Result<Vec<Allocation>>;

    /// Same as [`get_allocations`](Self::get_allocations) with monthly funds
    /// counted up to the month of `as_of`.
    async fn get_allocations_as_of(&self, as_of: NaiveDate) -> Result<Vec<Allocation>>;
}

/// Loads the snapshots and the NAV feed on every call. Holds no state
/// between requests.
pub struct ValuationService {
    snapshot_repository: Arc<dyn SnapshotRepositoryTrait>,
    nav_feed: Arc<dyn NavFeedProvider>,
}

impl ValuationService {
    pub fn new(
        snapshot_repository: Arc<dyn SnapshotRepositoryTrait>,
        nav_feed: Arc<dyn NavFeedProvider>,
    ) -> Self {
        Self {
            snapshot_repository,
            nav_feed,
        }
    }
}

/// Units and unit price of every fund.
///
/// Funds with a NAV symbol take the feed's NAV. Unpriced monthly funds hold
/// one unit per month elapsed since their `month` and keep their stored
/// price. Other unpriced funds are taken as stored.
pub fn price_funds(portfolio: Portfolio, lines: &[String], as_of: NaiveDate) -> Result<Vec<PricedFund>> {
    portfolio
        .funds
        .into_iter()
        .map(|fund| {
            let (quantity, price) = if fund.is_monthly() {
                let since = fund
                    .month
                    .as_deref()
                    .ok_or_else(|| Error::MalformedDate(String::new()))?;
                let months = months_elapsed_at(since, as_of)?;
                if months < 0 {
                    warn!(
                        "[Valuation] '{}' starts in the future ({}), counting zero months",
                        fund.name, since
                    );
                }
                (Decimal::from(months.max(0)), fund.price)
            } else if fund.is_unpriced() {
                (fund.quantity, fund.price)
            } else {
                let nav = parse_nav(lines, &fund.symbol).map_err(|e| {
                    warn!("[Valuation] No NAV for '{}': {}", fund.name, e);
                    Error::from(e)
                })?;
                (fund.quantity, nav)
            };

            Ok(PricedFund {
                class: fund.class,
                name: fund.name,
                symbol: fund.symbol,
                quantity,
                price,
            })
        })
        .collect()
}

#[async_trait]
impl ValuationServiceTrait for ValuationService {
    async fn get_allocations(&self) -> Result<Vec<Allocation>> {
        self.get_allocations_as_of(valuation_date_today()).await
    }

    async fn get_allocations_as_of(&self, as_of: NaiveDate) -> Result<Vec<Allocation>> {
        let portfolio = self.snapshot_repository.load_all()?;
        debug!("[Valuation] Loaded {} funds", portfolio.funds.len());

        let lines = self.nav_feed.fetch_lines().await?;
        debug!(
            "[Valuation] {} returned {} lines",
            self.nav_feed.id(),
            lines.len()
        );

        let priced = price_funds(portfolio, &lines, as_of)?;
        allocate(&priced)
    }
}
