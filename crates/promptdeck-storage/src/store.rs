//! `SqliteAccountStore`: the shared account keys in one SQLite table.
//!
//! Each surface of the extension opens its own store on the same file.
//! `detect_external_changes` reports keys rewritten through *other*
//! connections, using `PRAGMA data_version` as the cheap "anything changed?"
//! check and the per-key `revision` column to say what.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::{Connection, OptionalExtension};
use tracing::{debug, info};

use promptdeck_core::config::StorageConfig;
use promptdeck_core::{AccountStore, StorageError, StorageKey};

use crate::errors::{SqliteResultExt, StorageResult};
use crate::pool::ConnectionPool;

/// What this store last observed, for change detection.
#[derive(Debug, Default)]
struct Seen {
    data_version: Option<i64>,
    revisions: HashMap<StorageKey, i64>,
}

pub struct SqliteAccountStore {
    pool: ConnectionPool,
    seen: Mutex<Seen>,
}

impl SqliteAccountStore {
    /// Open (or create) the database at `path` and migrate it.
    pub fn open(path: &Path, read_pool_size: usize) -> StorageResult<Self> {
        let store = Self::with_pool(ConnectionPool::open(path, read_pool_size)?)?;
        info!(path = %path.display(), "Account store opened");
        Ok(store)
    }

    pub fn open_in_memory() -> StorageResult<Self> {
        Self::with_pool(ConnectionPool::open_in_memory()?)
    }

    /// File-backed when `db_path` is set, otherwise in memory.
    pub fn from_config(config: &StorageConfig) -> StorageResult<Self> {
        match &config.db_path {
            Some(path) => Self::open(Path::new(path), config.effective_read_pool_size()),
            None => Self::open_in_memory(),
        }
    }

    fn with_pool(pool: ConnectionPool) -> StorageResult<Self> {
        let store = Self {
            pool,
            seen: Mutex::new(Seen::default()),
        };
        // Baseline, so only changes after opening are reported.
        store.detect_external_changes()?;
        Ok(store)
    }

    /// Keys another connection wrote or removed since the previous call.
    ///
    /// Writes made through this store are never reported. Feed the result to
    /// `EntitlementService::handle_storage_change`.
    pub fn detect_external_changes(&self) -> StorageResult<Vec<StorageKey>> {
        self.pool.with_writer(|conn| {
            let data_version: i64 = conn
                .query_row("PRAGMA data_version", [], |row| row.get(0))
                .sqlite()?;

            let mut seen = self.lock_seen()?;
            if seen.data_version == Some(data_version) {
                return Ok(Vec::new());
            }
            let first = seen.data_version.is_none();
            seen.data_version = Some(data_version);

            let current = read_revisions(conn)?;
            let mut changed: Vec<StorageKey> = StorageKey::ALL
                .into_iter()
                .filter(|key| current.get(key) != seen.revisions.get(key))
                .collect();
            seen.revisions = current;

            if first {
                changed.clear();
            } else if !changed.is_empty() {
                debug!(?changed, "External account changes detected");
            }
            changed.sort();
            Ok(changed)
        })
    }

    /// Current revision of `key`, counting removals. `None` if never written.
    pub fn revision(&self, key: StorageKey) -> StorageResult<Option<i64>> {
        self.pool.with_reader(|conn| {
            conn.query_row(
                "SELECT revision FROM account_kv WHERE key = ?1",
                [key.as_str()],
                |row| row.get(0),
            )
            .optional()
            .sqlite()
        })
    }

    pub fn is_wal_mode(&self) -> bool {
        self.pool.is_wal_mode()
    }

    fn lock_seen(&self) -> StorageResult<MutexGuard<'_, Seen>> {
        self.seen.lock().map_err(|e| StorageError::LockPoisoned {
            context: format!("change tracker: {e}"),
        })
    }

    fn record_own_write(&self, key: StorageKey, revision: i64) -> StorageResult<()> {
        self.lock_seen()?.revisions.insert(key, revision);
        Ok(())
    }
}

fn read_revisions(conn: &Connection) -> StorageResult<HashMap<StorageKey, i64>> {
    let mut stmt = conn
        .prepare_cached("SELECT key, revision FROM account_kv")
        .sqlite()?;
    let rows = stmt
        .query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
        })
        .sqlite()?;

    let mut revisions = HashMap::new();
    for row in rows {
        let (key, revision) = row.sqlite()?;
        if let Some(key) = StorageKey::parse(&key) {
            revisions.insert(key, revision);
        }
    }
    Ok(revisions)
}

impl AccountStore for SqliteAccountStore {
    fn get(&self, key: StorageKey) -> Result<Option<serde_json::Value>, StorageError> {
        let raw: Option<String> = self.pool.with_reader(|conn| {
            conn.query_row(
                "SELECT value FROM account_kv WHERE key = ?1",
                [key.as_str()],
                |row| row.get::<_, Option<String>>(0),
            )
            .optional()
            .map(Option::flatten)
            .sqlite()
        })?;

        match raw {
            Some(text) => Ok(Some(serde_json::from_str(&text)?)),
            None => Ok(None),
        }
    }

    fn set(&self, key: StorageKey, value: serde_json::Value) -> Result<(), StorageError> {
        let text = serde_json::to_string(&value)?;
        self.pool.with_writer(|conn| {
            let revision: i64 = conn
                .query_row(
                    "INSERT INTO account_kv (key, value) VALUES (?1, ?2)
                     ON CONFLICT(key) DO UPDATE SET
                         value = excluded.value,
                         revision = account_kv.revision + 1,
                         updated_at = unixepoch()
                     RETURNING revision",
                    rusqlite::params![key.as_str(), text],
                    |row| row.get(0),
                )
                .sqlite()?;
            self.record_own_write(key, revision)
        })
    }

    fn remove(&self, key: StorageKey) -> Result<(), StorageError> {
        self.pool.with_writer(|conn| {
            let revision: Option<i64> = conn
                .query_row(
                    "UPDATE account_kv
                     SET value = NULL, revision = revision + 1, updated_at = unixepoch()
                     WHERE key = ?1 AND value IS NOT NULL
                     RETURNING revision",
                    [key.as_str()],
                    |row| row.get(0),
                )
                .optional()
                .sqlite()?;
            match revision {
                Some(revision) => self.record_own_write(key, revision),
                None => Ok(()),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_absent_is_none() {
        let store = SqliteAccountStore::open_in_memory().unwrap();
        assert!(store.get(StorageKey::User).unwrap().is_none());
        assert!(store.revision(StorageKey::User).unwrap().is_none());
    }

    #[test]
    fn test_set_get_remove() {
        let store = SqliteAccountStore::open_in_memory().unwrap();
        let user = json!({ "email": "a@b.com", "id": "u1" });
        store.set(StorageKey::User, user.clone()).unwrap();
        assert_eq!(store.get(StorageKey::User).unwrap(), Some(user));

        store.remove(StorageKey::User).unwrap();
        assert!(store.get(StorageKey::User).unwrap().is_none());
    }

    #[test]
    fn test_revision_grows_across_remove() {
        let store = SqliteAccountStore::open_in_memory().unwrap();
        store.set(StorageKey::DailyUsage, json!({ "date": "2024-01-01", "count": 1 })).unwrap();
        store.set(StorageKey::DailyUsage, json!({ "date": "2024-01-01", "count": 2 })).unwrap();
        assert_eq!(store.revision(StorageKey::DailyUsage).unwrap(), Some(2));

        store.remove(StorageKey::DailyUsage).unwrap();
        store.remove(StorageKey::DailyUsage).unwrap();
        assert_eq!(store.revision(StorageKey::DailyUsage).unwrap(), Some(3));

        store.set(StorageKey::DailyUsage, json!({ "date": "2024-01-02", "count": 0 })).unwrap();
        assert_eq!(store.revision(StorageKey::DailyUsage).unwrap(), Some(4));
    }

    #[test]
    fn test_own_writes_are_not_external() {
        let store = SqliteAccountStore::open_in_memory().unwrap();
        store.set(StorageKey::User, json!({ "email": "a@b.com" })).unwrap();
        store.remove(StorageKey::Subscription).unwrap();
        assert!(store.detect_external_changes().unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_value_is_serialization_error() {
        let store = SqliteAccountStore::open_in_memory().unwrap();
        store
            .pool
            .with_writer(|conn| {
                conn.execute(
                    "INSERT INTO account_kv (key, value) VALUES ('user', 'not json')",
                    [],
                )
                .sqlite()
            })
            .unwrap();
        let err = store.get(StorageKey::User).unwrap_err();
        assert!(matches!(err, StorageError::Serialization(_)));
    }
}
