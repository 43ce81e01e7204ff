//! Portfolio module - valuation and allocation of the merged snapshots.

pub mod allocation;
pub mod valuation;
