//! Origin-storage adapters.
//!
//! Browser consent lives in a flat string key-value store scoped to the
//! page origin. This module models that surface as the [`KeyValueStore`]
//! trait and provides two implementations:
//!
//! - [`MemoryStore`] — in-memory map with failure injection, for tests and
//!   headless embedding
//! - [`RedbStore`] — single-file redb database, the persistent backing used
//!   by the CLI
//!
//! Every operation is fallible: real origin storage can be unavailable
//! (privacy mode) or refuse writes (quota), and callers are expected to
//! degrade rather than crash.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use redb::{Database, ReadableTable, TableDefinition};

use crate::error::{ConsentError, ConsentResult};

const ORIGIN_TABLE: TableDefinition<&str, &str> = TableDefinition::new("origin_storage");

/// Flat string key-value storage, shaped like browser origin storage
pub trait KeyValueStore {
    /// Read the value under `key`, `None` if the key has never been set
    fn get_item(&self, key: &str) -> ConsentResult<Option<String>>;

    /// Write `value` under `key`, overwriting any previous value
    fn set_item(&self, key: &str, value: &str) -> ConsentResult<()>;

    /// Remove the value under `key`; removing an absent key is not an error
    fn remove_item(&self, key: &str) -> ConsentResult<()>;
}

#[derive(Default)]
struct MemoryStoreInner {
    items: HashMap<String, String>,
    fail_reads: bool,
    fail_writes: bool,
    quota_bytes: Option<usize>,
}

/// In-memory [`KeyValueStore`] with failure injection.
///
/// Clones share the same underlying map, so a test can hand one handle to a
/// manager and keep another for inspection.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<MemoryStoreInner>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Make all subsequent reads fail with [`ConsentError::StorageUnavailable`]
    pub fn set_fail_reads(&self, fail: bool) {
        self.inner.lock().fail_reads = fail;
    }

    /// Make all subsequent writes fail with [`ConsentError::StorageUnavailable`]
    pub fn set_fail_writes(&self, fail: bool) {
        self.inner.lock().fail_writes = fail;
    }

    /// Cap the total stored bytes (keys + values); writes past the cap fail
    /// with [`ConsentError::QuotaExceeded`]
    pub fn set_quota_bytes(&self, quota: Option<usize>) {
        self.inner.lock().quota_bytes = quota;
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.inner.lock().items.len()
    }

    /// Whether the store holds no keys
    pub fn is_empty(&self) -> bool {
        self.inner.lock().items.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> ConsentResult<Option<String>> {
        let inner = self.inner.lock();
        if inner.fail_reads {
            return Err(ConsentError::StorageUnavailable(
                "simulated read failure".to_string(),
            ));
        }
        Ok(inner.items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> ConsentResult<()> {
        let mut inner = self.inner.lock();
        if inner.fail_writes {
            return Err(ConsentError::StorageUnavailable(
                "simulated write failure".to_string(),
            ));
        }
        if let Some(quota) = inner.quota_bytes {
            let current: usize = inner
                .items
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            if current + key.len() + value.len() > quota {
                return Err(ConsentError::QuotaExceeded(format!(
                    "{} bytes over a {} byte quota",
                    current + key.len() + value.len(),
                    quota
                )));
            }
        }
        inner.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> ConsentResult<()> {
        let mut inner = self.inner.lock();
        if inner.fail_writes {
            return Err(ConsentError::StorageUnavailable(
                "simulated write failure".to_string(),
            ));
        }
        inner.items.remove(key);
        Ok(())
    }
}

/// Persistent [`KeyValueStore`] backed by a single-file redb database
#[derive(Clone)]
pub struct RedbStore {
    db: Arc<RwLock<Database>>,
}

impl RedbStore {
    /// Open (or create) the store at the given path.
    ///
    /// Parent directories are created as needed and the origin table is
    /// initialized so later reads never race table creation.
    pub fn new(path: impl AsRef<Path>) -> ConsentResult<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db = Database::create(path)?;

        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(ORIGIN_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self {
            db: Arc::new(RwLock::new(db)),
        })
    }
}

impl KeyValueStore for RedbStore {
    fn get_item(&self, key: &str) -> ConsentResult<Option<String>> {
        let db = self.db.read();
        let read_txn = db.begin_read()?;
        let table = read_txn.open_table(ORIGIN_TABLE)?;
        Ok(table.get(key)?.map(|v| v.value().to_string()))
    }

    fn set_item(&self, key: &str, value: &str) -> ConsentResult<()> {
        let db = self.db.read();
        let write_txn = db.begin_write()?;
        {
            let mut table = write_txn.open_table(ORIGIN_TABLE)?;
            table.insert(key, value)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> ConsentResult<()> {
        let db = self.db.read();
        let write_txn = db.begin_write()?;
        {
            let mut table = write_txn.open_table(ORIGIN_TABLE)?;
            table.remove(key)?;
        }
        write_txn.commit()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        assert!(store.get_item("k").unwrap().is_none());

        store.set_item("k", "v").unwrap();
        assert_eq!(store.get_item("k").unwrap().as_deref(), Some("v"));

        store.set_item("k", "v2").unwrap();
        assert_eq!(store.get_item("k").unwrap().as_deref(), Some("v2"));

        store.remove_item("k").unwrap();
        assert!(store.get_item("k").unwrap().is_none());
    }

    #[test]
    fn test_memory_store_clones_share_state() {
        let store = MemoryStore::new();
        let handle = store.clone();
        store.set_item("k", "v").unwrap();
        assert_eq!(handle.get_item("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_memory_store_read_failure() {
        let store = MemoryStore::new();
        store.set_item("k", "v").unwrap();
        store.set_fail_reads(true);
        assert!(matches!(
            store.get_item("k"),
            Err(ConsentError::StorageUnavailable(_))
        ));
    }

    #[test]
    fn test_memory_store_quota() {
        let store = MemoryStore::new();
        store.set_quota_bytes(Some(8));
        store.set_item("ab", "cd").unwrap();
        assert!(matches!(
            store.set_item("long-key", "long-value"),
            Err(ConsentError::QuotaExceeded(_))
        ));
        // Overwriting within quota still works
        store.set_item("ab", "ef").unwrap();
    }

    #[test]
    fn test_redb_store_round_trip() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = RedbStore::new(dir.path().join("origin.redb")).unwrap();

        assert!(store.get_item("k").unwrap().is_none());
        store.set_item("k", "v").unwrap();
        assert_eq!(store.get_item("k").unwrap().as_deref(), Some("v"));
        store.remove_item("k").unwrap();
        assert!(store.get_item("k").unwrap().is_none());
    }

    #[test]
    fn test_redb_store_persists_across_reopen() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("origin.redb");

        {
            let store = RedbStore::new(&path).unwrap();
            store.set_item("k", "v").unwrap();
        }

        let store = RedbStore::new(&path).unwrap();
        assert_eq!(store.get_item("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_redb_store_creates_parent_dirs() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deep").join("origin.redb");
        let store = RedbStore::new(&path).unwrap();
        store.set_item("k", "v").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_remove_absent_key_is_ok() {
        let store = MemoryStore::new();
        store.remove_item("never-set").unwrap();

        let dir = tempfile::TempDir::new().unwrap();
        let redb = RedbStore::new(dir.path().join("origin.redb")).unwrap();
        redb.remove_item("never-set").unwrap();
    }
}
