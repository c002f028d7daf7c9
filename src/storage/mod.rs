//! Storage layer for ControlFast
//!
//! Bundles the SQLite expense store with the audit journal and the snapshot
//! feed. A `Storage` is built once and handed to whatever needs it.

pub mod expenses;

pub use expenses::ExpenseStore;

use crate::audit::AuditLogger;
use crate::config::paths::ControlFastPaths;
use crate::error::ControlFastResult;
use crate::services::SnapshotFeed;

/// Main storage coordinator
pub struct Storage {
    paths: Option<ControlFastPaths>,
    pub expenses: ExpenseStore,
    pub audit: AuditLogger,
    pub feed: SnapshotFeed,
}

impl Storage {
    /// Open the on-disk store under `paths`, creating directories as needed
    pub fn open(paths: ControlFastPaths) -> ControlFastResult<Self> {
        paths.ensure_directories()?;

        Ok(Self {
            expenses: ExpenseStore::open(&paths.database_file())?,
            audit: AuditLogger::new(paths.audit_log()),
            feed: SnapshotFeed::new(),
            paths: Some(paths),
        })
    }

    /// A throwaway store that never touches the filesystem
    pub fn in_memory() -> ControlFastResult<Self> {
        Ok(Self {
            expenses: ExpenseStore::open_in_memory()?,
            audit: AuditLogger::in_memory(),
            feed: SnapshotFeed::new(),
            paths: None,
        })
    }

    /// Filesystem locations, if this store is on disk
    pub fn paths(&self) -> Option<&ControlFastPaths> {
        self.paths.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ControlFastPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert!(temp_dir.path().join("data").join("expenses.db").exists());
        assert_eq!(storage.expenses.count().unwrap(), 0);
        assert!(storage.paths().is_some());
    }

    #[test]
    fn test_in_memory_storage() {
        let storage = Storage::in_memory().unwrap();
        assert!(storage.paths().is_none());
        assert!(storage.audit.path().is_none());
        assert_eq!(storage.expenses.count().unwrap(), 0);
    }
}
