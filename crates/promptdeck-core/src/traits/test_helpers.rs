//! `MemoryAccountStore`: in-memory `AccountStore`.
//!
//! Used by tests and by surfaces that do not need durability. Writes can be
//! made to fail to exercise the best-effort persistence paths.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::errors::StorageError;

use super::store::{AccountStore, StorageKey};

#[derive(Debug, Default)]
pub struct MemoryAccountStore {
    values: Mutex<HashMap<StorageKey, serde_json::Value>>,
    fail_writes: AtomicBool,
    fail_reads: AtomicBool,
    writes: AtomicUsize,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `set`/`remove` fail.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent `get` fail.
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Successful writes so far (`set` + `remove`).
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Raw read that bypasses failure injection.
    pub fn peek(&self, key: StorageKey) -> Option<serde_json::Value> {
        self.values.lock().ok().and_then(|v| v.get(&key).cloned())
    }

    fn check_write(&self) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable {
                reason: "writes disabled".to_string(),
            });
        }
        Ok(())
    }

    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<StorageKey, serde_json::Value>>, StorageError>
    {
        self.values.lock().map_err(|e| StorageError::LockPoisoned {
            context: e.to_string(),
        })
    }
}

impl AccountStore for MemoryAccountStore {
    fn get(&self, key: StorageKey) -> Result<Option<serde_json::Value>, StorageError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable {
                reason: "reads disabled".to_string(),
            });
        }
        Ok(self.lock()?.get(&key).cloned())
    }

    fn set(&self, key: StorageKey, value: serde_json::Value) -> Result<(), StorageError> {
        self.check_write()?;
        self.lock()?.insert(key, value);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn remove(&self, key: StorageKey) -> Result<(), StorageError> {
        self.check_write()?;
        self.lock()?.remove(&key);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
