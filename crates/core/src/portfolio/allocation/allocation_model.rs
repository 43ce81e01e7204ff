//! Allocation models for the asset class breakdown.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};
use crate::funds::{AssetClass, PricedFund};

/// Total market value held in one asset class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    pub name: AssetClass,
    pub amount: Decimal,
}

/// Sum `quantity * price` per asset class.
///
/// Always returns one allocation per class in the order equity, debt, gold,
/// zero when no fund of that class is held. A value or total that does not
/// fit a `Decimal` is `AmountOverflow`.
pub fn allocate(funds: &[PricedFund]) -> Result<Vec<Allocation>> {
    AssetClass::ALL
        .iter()
        .map(|class| {
            let amount = funds
                .iter()
                .filter(|fund| fund.class == *class)
                .try_fold(Decimal::ZERO, |total, fund| {
                    total.checked_add(fund.market_value()?).ok_or_else(|| {
                        Error::AmountOverflow(format!("{} total", class))
                    })
                })?;
            Ok(Allocation {
                name: *class,
                amount,
            })
        })
        .collect()
}
