//! Valuation module - prices the merged snapshots and totals them per class.

mod valuation_service;

pub use valuation_service::*;

#[cfg(test)]
mod valuation_service_tests;
