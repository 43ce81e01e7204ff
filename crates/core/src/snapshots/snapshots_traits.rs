use crate::errors::Result;
use crate::funds::{Account, Portfolio, StoredFund};

/// Trait for snapshot repository operations.
///
/// One snapshot exists per account. Saving replaces the previous snapshot of
/// that account; loading merges every snapshot that exists.
pub trait SnapshotRepositoryTrait: Send + Sync {
    fn save(&self, account: Account, funds: &[StoredFund]) -> Result<()>;
    fn load_all(&self) -> Result<Portfolio>;
}
