#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use mfolio_market_data::{MarketDataError, NavFeedProvider};

    use crate::errors::{Error, Result};
    use crate::funds::{Account, AssetClass, Portfolio, StoredFund};
    use crate::portfolio::valuation::{price_funds, ValuationService, ValuationServiceTrait};
    use crate::snapshots::SnapshotRepositoryTrait;

    struct MockSnapshotRepository {
        funds: Vec<StoredFund>,
        fail_on_purpose: bool,
    }

    impl MockSnapshotRepository {
        fn new(funds: Vec<StoredFund>) -> Self {
            Self {
                funds,
                fail_on_purpose: false,
            }
        }

        fn failing() -> Self {
            Self {
                funds: Vec::new(),
                fail_on_purpose: true,
            }
        }
    }

    impl SnapshotRepositoryTrait for MockSnapshotRepository {
        fn save(&self, _account: Account, _funds: &[StoredFund]) -> Result<()> {
            unimplemented!()
        }

        fn load_all(&self) -> Result<Portfolio> {
            if self.fail_on_purpose {
                return Err(Error::SnapshotReadFailed(".portfolio_equity: EOF".to_string()));
            }
            Ok(Portfolio::new(self.funds.clone()))
        }
    }

    struct MockNavFeed {
        lines: Mutex<Option<Vec<String>>>,
        calls: AtomicUsize,
    }

    impl MockNavFeed {
        fn new(lines: &[&str]) -> Self {
            Self {
                lines: Mutex::new(Some(lines.iter().map(|l| l.to_string()).collect())),
                calls: AtomicUsize::new(0),
            }
        }

        fn unavailable() -> Self {
            Self {
                lines: Mutex::new(None),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl NavFeedProvider for MockNavFeed {
        fn id(&self) -> &'static str {
            "MOCK"
        }

        async fn fetch_lines(&self) -> std::result::Result<Vec<String>, MarketDataError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.lines
                .lock()
                .unwrap()
                .clone()
                .ok_or_else(|| MarketDataError::UpstreamUnavailable("HTTP 503".to_string()))
        }
    }

    fn fund(class: AssetClass, symbol: &str, quantity: Decimal) -> StoredFund {
        StoredFund {
            class,
            name: format!("{} fund", symbol),
            symbol: symbol.to_string(),
            month: None,
            quantity,
            price: Decimal::ZERO,
        }
    }

    fn monthly(class: AssetClass, month: Option<&str>, price: Decimal) -> StoredFund {
        StoredFund {
            class,
            name: "pension monthly".to_string(),
            symbol: "NA".to_string(),
            month: month.map(str::to_string),
            quantity: dec!(99),
            price,
        }
    }

    fn april_2020() -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 4, 10).unwrap()
    }

    fn amounts(service_result: &[crate::portfolio::allocation::Allocation]) -> Vec<(AssetClass, Decimal)> {
        service_result.iter().map(|a| (a.name, a.amount)).collect()
    }

    #[tokio::test]
    async fn test_two_snapshots_priced_from_feed() {
        let repo = MockSnapshotRepository::new(vec![
            fund(AssetClass::Equity, "ABC", dec!(10)),
            fund(AssetClass::Debt, "XYZ", dec!(5)),
        ]);
        let feed = MockNavFeed::new(&["1;ABC;-;Fund A;50.0;x", "2;XYZ;-;Fund X;20.0;x"]);
        let service = ValuationService::new(Arc::new(repo), Arc::new(feed));

        let allocations = service.get_allocations_as_of(april_2020()).await.unwrap();
        assert_eq!(
            amounts(&allocations),
            vec![
                (AssetClass::Equity, dec!(500)),
                (AssetClass::Debt, dec!(100)),
                (AssetClass::Gold, dec!(0)),
            ]
        );
    }

    #[tokio::test]
    async fn test_monthly_fund_counts_elapsed_months() {
        let repo = MockSnapshotRepository::new(vec![monthly(
            AssetClass::Debt,
            Some("01/2020"),
            dec!(1000),
        )]);
        let feed = MockNavFeed::new(&[]);
        let service = ValuationService::new(Arc::new(repo), Arc::new(feed));

        let allocations = service.get_allocations_as_of(april_2020()).await.unwrap();
        assert_eq!(
            amounts(&allocations),
            vec![
                (AssetClass::Equity, dec!(0)),
                (AssetClass::Debt, dec!(3000)),
                (AssetClass::Gold, dec!(0)),
            ]
        );
    }

    #[tokio::test]
    async fn test_missing_symbol_fails_the_whole_valuation() {
        let repo = MockSnapshotRepository::new(vec![
            fund(AssetClass::Equity, "ABC", dec!(10)),
            fund(AssetClass::Equity, "ZZZ", dec!(1)),
        ]);
        let feed = MockNavFeed::new(&["1;ABC;-;Fund A;50.0;x"]);
        let service = ValuationService::new(Arc::new(repo), Arc::new(feed));

        let err = service.get_allocations_as_of(april_2020()).await.unwrap_err();
        assert!(matches!(
            err,
            Error::MarketData(MarketDataError::SymbolNotFound(ref s)) if s == "ZZZ"
        ));
    }

    #[tokio::test]
    async fn test_feed_failure_is_surfaced() {
        let repo = MockSnapshotRepository::new(vec![fund(AssetClass::Equity, "ABC", dec!(10))]);
        let service = ValuationService::new(Arc::new(repo), Arc::new(MockNavFeed::unavailable()));

        let err = service.get_allocations().await.unwrap_err();
        assert!(matches!(
            err,
            Error::MarketData(MarketDataError::UpstreamUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_snapshot_failure_skips_the_feed() {
        let feed = Arc::new(MockNavFeed::new(&[]));
        let service = ValuationService::new(Arc::new(MockSnapshotRepository::failing()), feed.clone());

        let err = service.get_allocations().await.unwrap_err();
        assert!(matches!(err, Error::SnapshotReadFailed(_)));
        assert_eq!(feed.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_unpriced_fund_is_taken_as_stored() {
        let mut cash = fund(AssetClass::Debt, "NA", dec!(2));
        cash.price = dec!(1500);
        let priced = price_funds(Portfolio::new(vec![cash]), &[], april_2020()).unwrap();
        assert_eq!(priced[0].quantity, dec!(2));
        assert_eq!(priced[0].price, dec!(1500));
        assert_eq!(priced[0].market_value().unwrap(), dec!(3000));
    }

    #[test]
    fn test_monthly_fund_without_month_is_malformed() {
        let err = price_funds(
            Portfolio::new(vec![monthly(AssetClass::Debt, None, dec!(1000))]),
            &[],
            april_2020(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::MalformedDate(_)));
    }

    #[test]
    fn test_monthly_fund_with_bad_month_is_malformed() {
        let err = price_funds(
            Portfolio::new(vec![monthly(AssetClass::Debt, Some("2020/01"), dec!(1000))]),
            &[],
            april_2020(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::MalformedDate(_)));
    }

    #[test]
    fn test_future_monthly_fund_counts_zero() {
        let priced = price_funds(
            Portfolio::new(vec![monthly(AssetClass::Debt, Some("12/2020"), dec!(1000))]),
            &[],
            april_2020(),
        )
        .unwrap();
        assert_eq!(priced[0].quantity, dec!(0));
    }

    #[test]
    fn test_priced_fund_keeps_quantity_and_takes_nav() {
        let lines = vec!["119568;INF209K01VA3;-;LIQUID;412.9961;17-Oct-2026".to_string()];
        let priced = price_funds(
            Portfolio::new(vec![fund(AssetClass::Debt, "INF209K01VA3", dec!(3))]),
            &lines,
            april_2020(),
        )
        .unwrap();
        assert_eq!(priced[0].quantity, dec!(3));
        assert_eq!(priced[0].price, dec!(412.9961));
    }

    #[tokio::test]
    async fn test_allocation_sum_law() {
        let funds = vec![
            fund(AssetClass::Equity, "E1", dec!(1.5)),
            fund(AssetClass::Equity, "E2", dec!(4)),
            fund(AssetClass::Debt, "D1", dec!(7)),
            fund(AssetClass::Gold, "G1", dec!(2.25)),
            fund(AssetClass::Gold, "G2", dec!(0)),
        ];
        let lines = [
            "1;E1;-;x;11.1;x",
            "2;E2;-;x;22.2;x",
            "3;D1;-;x;33.3;x",
            "4;G1;-;x;44.4;x",
            "5;G2;-;x;55.5;x",
        ];
        let service = ValuationService::new(
            Arc::new(MockSnapshotRepository::new(funds.clone())),
            Arc::new(MockNavFeed::new(&lines)),
        );
        let allocations = service.get_allocations_as_of(april_2020()).await.unwrap();

        let owned: Vec<String> = lines.iter().map(|l| l.to_string()).collect();
        let priced = price_funds(Portfolio::new(funds), &owned, april_2020()).unwrap();
        assert_eq!(allocations.len(), 3);
        for allocation in &allocations {
            let expected: Decimal = priced
                .iter()
                .filter(|f| f.class == allocation.name)
                .map(|f| f.quantity * f.price)
                .sum();
            assert_eq!(allocation.amount, expected);
        }
        assert_eq!(allocations[0].amount, dec!(105.45));
        assert_eq!(allocations[1].amount, dec!(233.1));
        assert_eq!(allocations[2].amount, dec!(99.9));
    }
}
