//! Funds module - the fund record at each stage of the pipeline.

mod funds_model;

pub use funds_model::{Account, AssetClass, Portfolio, PricedFund, RawHolding, StoredFund};
