use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use log::{debug, info};
use mfolio_core::funds::{Account, Portfolio, StoredFund};
use mfolio_core::snapshots::SnapshotRepositoryTrait;
use mfolio_core::Result;

use crate::errors::StorageError;

/// Every snapshot file name starts with this prefix.
pub const SNAPSHOT_FILE_PREFIX: &str = ".portfolio";

/// Files whose name contains this marker are never loaded.
pub const EXCLUDED_SNAPSHOT_MARKER: &str = "example";

#[cfg(unix)]
const SNAPSHOT_FILE_MODE: u32 = 0o644;

/// File name of an account's snapshot, e.g. `.portfolio_equity`.
pub fn snapshot_file_name(account: Account) -> String {
    format!(
        "{}_{}",
        SNAPSHOT_FILE_PREFIX,
        account.as_str().to_lowercase()
    )
}

fn is_snapshot_file_name(name: &str) -> bool {
    name.starts_with(SNAPSHOT_FILE_PREFIX) && !name.contains(EXCLUDED_SNAPSHOT_MARKER)
}

/// Snapshot repository over JSON files in one directory.
///
/// Writes are serialised per account. Reads take no lock; a snapshot
/// caught mid-write fails that read with a parse error.
#[derive(Debug)]
pub struct SnapshotRepository {
    data_dir: PathBuf,
    write_locks: HashMap<Account, Mutex<()>>,
}

impl SnapshotRepository {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let write_locks = Account::ALL
            .iter()
            .map(|account| (*account, Mutex::new(())))
            .collect();
        Self {
            data_dir: data_dir.into(),
            write_locks,
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn snapshot_path(&self, account: Account) -> PathBuf {
        self.data_dir.join(snapshot_file_name(account))
    }

    fn save_impl(&self, account: Account, funds: &[StoredFund]) -> std::result::Result<(), StorageError> {
        let lock = self
            .write_locks
            .get(&account)
            .ok_or_else(|| StorageError::LockPoisoned(account.to_string()))?;
        let _guard = lock
            .lock()
            .map_err(|_| StorageError::LockPoisoned(account.to_string()))?;

        let path = self.snapshot_path(account);
        let portfolio = Portfolio::new(funds.to_vec());
        let json = serde_json::to_string_pretty(&portfolio).map_err(|source| {
            StorageError::SerializeFailed {
                account: account.to_string(),
                source,
            }
        })?;

        fs::write(&path, json).map_err(|source| StorageError::WriteFailed {
            path: path.clone(),
            source,
        })?;
        set_snapshot_permissions(&path)?;

        info!(
            "[Snapshots] Saved {} funds to {}",
            funds.len(),
            path.display()
        );
        Ok(())
    }

    /// Snapshot files in the data directory, sorted by name.
    fn snapshot_files(&self) -> std::result::Result<Vec<PathBuf>, StorageError> {
        let entries = fs::read_dir(&self.data_dir).map_err(|source| StorageError::ListFailed {
            path: self.data_dir.clone(),
            source,
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| StorageError::ListFailed {
                path: self.data_dir.clone(),
                source,
            })?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            let path = entry.path();
            if is_snapshot_file_name(name) && path.is_file() {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    fn load_file(path: &Path) -> std::result::Result<Portfolio, StorageError> {
        let raw = fs::read(path).map_err(|source| StorageError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let portfolio: Portfolio =
            serde_json::from_slice(&raw).map_err(|source| StorageError::ParseFailed {
                path: path.to_path_buf(),
                source,
            })?;

        for fund in &portfolio.funds {
            fund.validate().map_err(|e| StorageError::InvalidFund {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        }
        Ok(portfolio)
    }

    fn load_all_impl(&self) -> std::result::Result<Portfolio, StorageError> {
        let mut portfolio = Portfolio::default();
        for path in self.snapshot_files()? {
            let snapshot = Self::load_file(&path)?;
            debug!(
                "[Snapshots] Loaded {} funds from {}",
                snapshot.funds.len(),
                path.display()
            );
            portfolio.merge(snapshot);
        }
        Ok(portfolio)
    }
}

#[cfg(unix)]
fn set_snapshot_permissions(path: &Path) -> std::result::Result<(), StorageError> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(SNAPSHOT_FILE_MODE)).map_err(|source| {
        StorageError::WriteFailed {
            path: path.to_path_buf(),
            source,
        }
    })
}

#[cfg(not(unix))]
fn set_snapshot_permissions(_path: &Path) -> std::result::Result<(), StorageError> {
    Ok(())
}

impl SnapshotRepositoryTrait for SnapshotRepository {
    fn save(&self, account: Account, funds: &[StoredFund]) -> Result<()> {
        Ok(self.save_impl(account, funds)?)
    }

    fn load_all(&self) -> Result<Portfolio> {
        Ok(self.load_all_impl()?)
    }
}
