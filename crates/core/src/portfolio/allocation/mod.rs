//! Portfolio allocation module for asset class breakdowns.

mod allocation_model;

pub use allocation_model::*;
