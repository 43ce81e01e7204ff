//! File storage implementation for mfolio.
//!
//! This crate implements the snapshot repository trait defined in
//! `mfolio-core` on top of plain JSON files in a data directory.
//!
//! ```text
//! core (domain)          connect (sync)
//!       │                      │
//!       └──────────┬───────────┘
//!                  │
//!                  ▼
//!           storage-fs (this crate)
//!                  │
//!                  ▼
//!     <data dir>/.portfolio_<account>
//! ```

pub mod errors;
pub mod snapshots;

pub use errors::StorageError;
pub use snapshots::{
    snapshot_file_name, SnapshotRepository, EXCLUDED_SNAPSHOT_MARKER, SNAPSHOT_FILE_PREFIX,
};

// Re-export from mfolio-core for convenience
pub use mfolio_core::errors::{Error, Result};
