use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{MONTHLY_NAME_SUFFIX, UNPRICED_SYMBOL};
use crate::errors::{Error, Result, ValidationError};

/// Internal asset class of a holding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetClass {
    Equity,
    Debt,
    Gold,
}

impl AssetClass {
    /// Every class, in the order allocations are reported.
    pub const ALL: [AssetClass; 3] = [AssetClass::Equity, AssetClass::Debt, AssetClass::Gold];

    pub fn as_str(&self) -> &'static str {
        match self {
            AssetClass::Equity => "equity",
            AssetClass::Debt => "debt",
            AssetClass::Gold => "gold",
        }
    }
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Broker login the holdings were fetched under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Account {
    Equity,
    Debt,
}

impl Account {
    pub const ALL: [Account; 2] = [Account::Equity, Account::Debt];

    pub fn as_str(&self) -> &'static str {
        match self {
            Account::Equity => "equity",
            Account::Debt => "debt",
        }
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Account {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "equity" => Ok(Account::Equity),
            "debt" => Ok(Account::Debt),
            other => Err(Error::BadRequest(format!(
                "invalid account '{}', expected equity or debt",
                other
            ))),
        }
    }
}

/// A mutual fund holding as reported by the broker.
#[derive(Debug, Clone, PartialEq)]
pub struct RawHolding {
    pub fund: String,
    pub trading_symbol: String,
    pub quantity: Decimal,
}

/// A fund as persisted in a snapshot file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredFund {
    pub class: AssetClass,
    pub name: String,
    pub symbol: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<String>,
    pub quantity: Decimal,
    pub price: Decimal,
}

impl StoredFund {
    /// Fund built from a classified broker holding. Price stays zero until the
    /// first valuation.
    pub fn from_holding(holding: RawHolding, class: AssetClass) -> Self {
        Self {
            class,
            name: holding.fund,
            symbol: holding.trading_symbol,
            month: None,
            quantity: holding.quantity,
            price: Decimal::ZERO,
        }
    }

    pub fn is_unpriced(&self) -> bool {
        self.symbol == UNPRICED_SYMBOL
    }

    /// Unpriced funds named `... monthly` accrue one unit per elapsed month.
    pub fn is_monthly(&self) -> bool {
        self.is_unpriced() && self.name.ends_with(MONTHLY_NAME_SUFFIX)
    }

    pub fn validate(&self) -> Result<()> {
        if self.symbol.is_empty() {
            return Err(ValidationError::MissingField(format!("symbol of '{}'", self.name)).into());
        }
        if self.quantity.is_sign_negative() && !self.quantity.is_zero() {
            return Err(ValidationError::InvalidInput(format!(
                "negative quantity {} for '{}'",
                self.quantity, self.name
            ))
            .into());
        }
        if self.price.is_sign_negative() && !self.price.is_zero() {
            return Err(ValidationError::InvalidInput(format!(
                "negative price {} for '{}'",
                self.price, self.name
            ))
            .into());
        }
        Ok(())
    }
}

/// A fund during valuation, carrying the units and unit price it is
/// valued at.
#[derive(Debug, Clone, PartialEq)]
pub struct PricedFund {
    pub class: AssetClass,
    pub name: String,
    pub symbol: String,
    pub quantity: Decimal,
    pub price: Decimal,
}

impl PricedFund {
    /// `quantity * price`, or `AmountOverflow` when the product does not fit
    /// a `Decimal`.
    pub fn market_value(&self) -> Result<Decimal> {
        self.quantity.checked_mul(self.price).ok_or_else(|| {
            Error::AmountOverflow(format!(
                "{} units of '{}' at {}",
                self.quantity, self.name, self.price
            ))
        })
    }
}

/// Snapshot file body: `{"funds":[...]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    pub funds: Vec<StoredFund>,
}

impl Portfolio {
    pub fn new(funds: Vec<StoredFund>) -> Self {
        Self { funds }
    }

    /// Append the funds of another snapshot. Duplicates are kept.
    pub fn merge(&mut self, other: Portfolio) {
        self.funds.extend(other.funds);
    }

    pub fn is_empty(&self) -> bool {
        self.funds.is_empty()
    }
}
