//! Daily usage counter for the metered modification action.
//!
//! Replaces a timer-based reset: the stored `{date, count}` pair is compared
//! with today's date on every read, so the reset happens lazily and exactly
//! once per calendar-day boundary.

use std::sync::Arc;

use tracing::warn;

use crate::errors::StorageError;
use crate::traits::AccountStore;
use crate::types::DailyUsage;

use super::persisted;

/// Reads and writes the `dailyUsage` key and applies the daily limit.
pub struct UsageCounter {
    store: Arc<dyn AccountStore>,
    limit: u32,
}

impl UsageCounter {
    pub fn new(store: Arc<dyn AccountStore>, limit: u32) -> Self {
        Self { store, limit }
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Persisted usage, or `{0, today}` if absent or unreadable. Never fails:
    /// unreadable usage fails open toward the user.
    pub fn load(&self, today: &str) -> DailyUsage {
        match persisted::read_usage(self.store.as_ref()) {
            Ok(Some(usage)) => usage,
            Ok(None) => DailyUsage::fresh(today),
            Err(e) => {
                warn!(error = %e, "Unreadable daily usage record, treating as zero usage");
                DailyUsage::fresh(today)
            }
        }
    }

    /// Stored usage only if a record exists. Distinguishes "never used" from
    /// "used zero times today" for sign-in. A read failure is returned, not
    /// folded into `None`: the caller must not overwrite a record it could
    /// not read.
    pub fn load_existing(&self) -> Result<Option<DailyUsage>, StorageError> {
        persisted::read_usage(self.store.as_ref())
    }

    pub fn current_count(&self, usage: &DailyUsage, today: &str) -> u32 {
        usage.current_count(today)
    }

    /// `max(0, limit - current_count(today))`.
    pub fn remaining(&self, usage: &DailyUsage, today: &str) -> u32 {
        self.limit.saturating_sub(self.current_count(usage, today))
    }

    pub fn is_exhausted(&self, usage: &DailyUsage, today: &str) -> bool {
        self.current_count(usage, today) >= self.limit
    }

    /// Count one unit on `today` in memory. Returns the new count.
    pub fn increment(&self, usage: &mut DailyUsage, today: &str) -> u32 {
        usage.increment(today)
    }

    /// Write the `{date, count}` pair in a single store write.
    pub fn persist(&self, usage: &DailyUsage) -> Result<(), StorageError> {
        persisted::write_usage(self.store.as_ref(), usage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{MemoryAccountStore, StorageKey};

    fn counter(store: &Arc<MemoryAccountStore>) -> UsageCounter {
        UsageCounter::new(store.clone() as Arc<dyn AccountStore>, 3)
    }

    #[test]
    fn test_load_absent_is_zero_today() {
        let store = Arc::new(MemoryAccountStore::new());
        let usage = counter(&store).load("2024-01-01");
        assert_eq!(usage, DailyUsage::fresh("2024-01-01"));
    }

    #[test]
    fn test_load_unreadable_fails_open() {
        let store = Arc::new(MemoryAccountStore::new());
        store.set_fail_reads(true);
        let usage = counter(&store).load("2024-01-01");
        assert_eq!(usage.count, 0);
    }

    #[test]
    fn test_load_existing_surfaces_read_errors() {
        let store = Arc::new(MemoryAccountStore::new());
        let c = counter(&store);
        assert_eq!(c.load_existing().unwrap(), None);

        store.set_fail_reads(true);
        assert!(c.load_existing().is_err());
    }

    #[test]
    fn test_remaining_saturates_at_zero() {
        let store = Arc::new(MemoryAccountStore::new());
        let c = counter(&store);
        let usage = DailyUsage {
            date: "2024-01-01".into(),
            count: 7,
        };
        assert_eq!(c.remaining(&usage, "2024-01-01"), 0);
        assert_eq!(c.remaining(&usage, "2024-01-02"), 3);
    }

    #[test]
    fn test_persist_is_single_write() {
        let store = Arc::new(MemoryAccountStore::new());
        let c = counter(&store);
        let mut usage = c.load("2024-01-01");
        c.increment(&mut usage, "2024-01-01");
        c.persist(&usage).unwrap();

        assert_eq!(store.write_count(), 1);
        let raw = store.peek(StorageKey::DailyUsage).unwrap();
        assert_eq!(raw, serde_json::json!({ "date": "2024-01-01", "count": 1 }));
    }
}
