//! Mutex-guarded ledger store with an optional JSON snapshot.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use super::Tables;
use crate::error::{LedgerError, LedgerResult};

/// Holds the ledger tables and serializes every write.
///
/// Each [`transaction`](MemoryStore::transaction) runs against a working copy
/// of the tables. The copy replaces the live tables only when the closure
/// returns `Ok` and, if a snapshot path is configured, only after the
/// snapshot has been written. A closure returning `Err` leaves nothing behind.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    snapshot_path: Option<PathBuf>,
}

impl MemoryStore {
    /// Creates an empty store that is never persisted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a store backed by the snapshot at `path`.
    ///
    /// A missing file yields an empty store; the file is created on the
    /// first committed transaction.
    pub fn open<P: AsRef<Path>>(path: P) -> LedgerResult<Self> {
        let path = path.as_ref().to_path_buf();
        let tables = if path.exists() {
            let raw = fs::read_to_string(&path).map_err(|e| LedgerError::SnapshotIo {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
            let tables: Tables =
                serde_json::from_str(&raw).map_err(|e| LedgerError::SnapshotCorrupt {
                    path: path.display().to_string(),
                    message: e.to_string(),
                })?;
            info!(path = %path.display(), "Loaded ledger snapshot");
            tables
        } else {
            info!(path = %path.display(), "No ledger snapshot yet, starting empty");
            Tables::default()
        };

        Ok(Self {
            tables: Mutex::new(tables),
            snapshot_path: Some(path),
        })
    }

    /// Opens the snapshot at `path` if given, otherwise an unpersisted store.
    pub fn from_optional_path(path: Option<&Path>) -> LedgerResult<Self> {
        match path {
            Some(path) => Self::open(path),
            None => Ok(Self::new()),
        }
    }

    /// Runs `f` against a consistent view of the tables.
    pub fn read<R>(&self, f: impl FnOnce(&Tables) -> R) -> LedgerResult<R> {
        let guard = self.lock();
        Ok(f(&guard))
    }

    /// Runs `f` as one atomic unit of work.
    ///
    /// The outer `Result` reports store failures; the inner one is whatever
    /// `f` returned. Changes are committed only for an inner `Ok`.
    ///
    /// # Examples
    ///
    /// ```
    /// use shift_ledger::store::MemoryStore;
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let store = MemoryStore::new();
    /// let now = NaiveDate::from_ymd_opt(2026, 3, 2)
    ///     .unwrap()
    ///     .and_hms_opt(9, 0, 0)
    ///     .unwrap();
    ///
    /// let refused: Result<(), &str> = store
    ///     .transaction(|tables| {
    ///         tables.upsert_tip(1, 1, Decimal::ONE, now);
    ///         Err("changed my mind")
    ///     })
    ///     .unwrap();
    /// assert!(refused.is_err());
    /// assert!(store.read(|tables| tables.all_tips().is_empty()).unwrap());
    /// ```
    pub fn transaction<T, E>(
        &self,
        f: impl FnOnce(&mut Tables) -> Result<T, E>,
    ) -> LedgerResult<Result<T, E>> {
        let mut guard = self.lock();
        let mut working = guard.clone();

        let result = f(&mut working);
        if result.is_ok() {
            if let Some(path) = &self.snapshot_path {
                write_snapshot(path, &working)?;
            }
            *guard = working;
        } else {
            debug!("Transaction rolled back");
        }
        Ok(result)
    }

    /// Takes the lock even after a panic in another holder. Writers only
    /// replace the live tables once their closure and snapshot succeeded,
    /// so the guarded value is always a committed state.
    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(|poisoned: PoisonError<_>| {
            warn!("Ledger store lock was poisoned by a panic, continuing");
            poisoned.into_inner()
        })
    }
}

/// Writes the tables next to `path` and renames over it.
fn write_snapshot(path: &Path, tables: &Tables) -> LedgerResult<()> {
    let io_error = |e: std::io::Error| LedgerError::SnapshotIo {
        path: path.display().to_string(),
        message: e.to_string(),
    };

    let json = serde_json::to_string_pretty(tables).map_err(|e| LedgerError::SnapshotCorrupt {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error)?;
    }
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json).map_err(io_error)?;
    fs::rename(&tmp, path).map_err(io_error)?;
    debug!(path = %path.display(), "Wrote ledger snapshot");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Shift;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn shift() -> Shift {
        let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        Shift {
            id: 0,
            shift_date: date,
            opening_cash: Decimal::new(1000, 0),
            closing_cash: None,
            created_at: date.and_hms_opt(9, 0, 0).unwrap(),
            admin_id: None,
        }
    }

    fn temp_snapshot(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("shift-ledger-{}-{}", name, uuid::Uuid::new_v4()));
        dir.join("ledger.json")
    }

    #[test]
    fn test_committed_transaction_is_visible() {
        let store = MemoryStore::new();
        let id: Result<i64, ()> = store.transaction(|t| Ok(t.insert_shift(shift()))).unwrap();

        assert_eq!(id, Ok(1));
        assert!(store.read(|t| t.shift(1).is_some()).unwrap());
    }

    #[test]
    fn test_failed_transaction_rolls_back_every_change() {
        let store = MemoryStore::new();
        let result: Result<(), &str> = store
            .transaction(|t| {
                t.insert_shift(shift());
                t.insert_shift(shift());
                Err("refused")
            })
            .unwrap();

        assert_eq!(result, Err("refused"));
        assert_eq!(store.read(|t| t.shifts().count()).unwrap(), 0);
    }

    #[test]
    fn test_snapshot_round_trip() {
        let path = temp_snapshot("roundtrip");
        {
            let store = MemoryStore::open(&path).unwrap();
            let _: Result<i64, ()> = store.transaction(|t| Ok(t.insert_shift(shift()))).unwrap();
        }
        assert!(path.exists());

        let reopened = MemoryStore::open(&path).unwrap();
        let opening = reopened
            .read(|t| t.shift(1).map(|s| s.opening_cash))
            .unwrap();
        assert_eq!(opening, Some(Decimal::new(1000, 0)));

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_rolled_back_transaction_does_not_touch_snapshot() {
        let path = temp_snapshot("rollback");
        let store = MemoryStore::open(&path).unwrap();
        let _: Result<(), ()> = store
            .transaction(|t| {
                t.insert_shift(shift());
                Err(())
            })
            .unwrap();

        assert!(!path.exists());
    }

    #[test]
    fn test_corrupt_snapshot_is_reported() {
        let path = temp_snapshot("corrupt");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "not json").unwrap();

        let result = MemoryStore::open(&path);
        assert!(matches!(result, Err(LedgerError::SnapshotCorrupt { .. })));

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_panicking_transaction_leaves_store_usable() {
        let store = MemoryStore::new();
        let _: Result<i64, ()> = store.transaction(|t| Ok(t.insert_shift(shift()))).unwrap();

        let crashed = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _: LedgerResult<Result<(), ()>> = store.transaction(|t| {
                t.insert_shift(shift());
                panic!("arithmetic overflow");
            });
        }));
        assert!(crashed.is_err());

        assert_eq!(store.read(|t| t.shifts().count()).unwrap(), 1);
        let id: Result<i64, ()> = store.transaction(|t| Ok(t.insert_shift(shift()))).unwrap();
        assert_eq!(id, Ok(2));
    }
}
