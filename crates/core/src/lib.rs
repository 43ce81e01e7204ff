//! mfolio Core - Domain entities, services, and traits.
//!
//! This crate contains the business logic of the allocation tracker: the
//! fund model at each pipeline stage, the classification rules, and the
//! valuation that turns persisted snapshots into per-class allocations.
//! It is storage-agnostic; snapshot persistence is implemented by the
//! `storage-fs` crate behind [`snapshots::SnapshotRepositoryTrait`].

pub mod classification;
pub mod constants;
pub mod errors;
pub mod funds;
pub mod portfolio;
pub mod snapshots;
pub mod utils;

pub use classification::{ClassificationRule, ClassificationRules, RuleAction};
pub use funds::{Account, AssetClass, Portfolio, PricedFund, RawHolding, StoredFund};
pub use portfolio::allocation::Allocation;
pub use portfolio::valuation::{ValuationService, ValuationServiceTrait};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
