//! Per-day usage counter for the metered action.

use serde::{Deserialize, Serialize};

/// Persisted under the `dailyUsage` key as `{ "date": "YYYY-MM-DD", "count": n }`.
///
/// The reset is lazy: a record whose date differs from today counts as zero.
/// Dates are compared as strings, so a corrupted date is simply "another day".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyUsage {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub count: u32,
}

impl DailyUsage {
    /// Zero usage on `today`.
    pub fn fresh(today: &str) -> Self {
        Self {
            date: today.to_string(),
            count: 0,
        }
    }

    /// Count attributable to `today`.
    pub fn current_count(&self, today: &str) -> u32 {
        if self.date == today {
            self.count
        } else {
            0
        }
    }

    /// Record one unit on `today`, resetting first if the stored day is stale.
    /// Returns the new count.
    pub fn increment(&mut self, today: &str) -> u32 {
        if self.date == today {
            self.count = self.count.saturating_add(1);
        } else {
            self.date = today.to_string();
            self.count = 1;
        }
        self.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_count_same_day() {
        let usage = DailyUsage {
            date: "2024-01-01".into(),
            count: 2,
        };
        assert_eq!(usage.current_count("2024-01-01"), 2);
    }

    #[test]
    fn test_current_count_new_day_is_zero() {
        let usage = DailyUsage {
            date: "2024-01-01".into(),
            count: 3,
        };
        assert_eq!(usage.current_count("2024-01-02"), 0);
    }

    #[test]
    fn test_increment_resets_on_new_day() {
        let mut usage = DailyUsage {
            date: "2024-01-01".into(),
            count: 3,
        };
        assert_eq!(usage.increment("2024-01-02"), 1);
        assert_eq!(usage.date, "2024-01-02");
    }

    #[test]
    fn test_corrupt_date_counts_as_new_day() {
        let mut usage = DailyUsage {
            date: "not-a-date".into(),
            count: 99,
        };
        assert_eq!(usage.current_count("2024-01-01"), 0);
        assert_eq!(usage.increment("2024-01-01"), 1);
    }

    #[test]
    fn test_missing_fields_deserialize_to_defaults() {
        let usage: DailyUsage = serde_json::from_str("{}").unwrap();
        assert_eq!(usage.count, 0);
        assert_eq!(usage.current_count("2024-01-01"), 0);
    }
}
