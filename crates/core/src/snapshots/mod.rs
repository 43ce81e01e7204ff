//! Snapshots module - persisted per-account holdings.

mod snapshots_traits;

pub use snapshots_traits::SnapshotRepositoryTrait;
