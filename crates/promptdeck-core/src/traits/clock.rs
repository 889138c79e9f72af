//! Calendar source for the lazy daily reset.

use std::sync::Mutex;

use chrono::{DateTime, Local, NaiveDate, Utc};

use crate::constants::USAGE_DATE_FORMAT;

/// Supplies "today" (local calendar date) and "now" (for subscription expiry).
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;

    fn now(&self) -> DateTime<Utc>;

    /// Today in the persisted `YYYY-MM-DD` form.
    fn today_string(&self) -> String {
        self.today().format(USAGE_DATE_FORMAT).to_string()
    }
}

/// Wall clock, local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Settable clock for tests and replay.
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Midday UTC on the given date, so "today" is unambiguous.
    pub fn on(year: i32, month: u32, day: u32) -> Self {
        let date = NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default();
        let noon = date.and_hms_opt(12, 0, 0).unwrap_or_default().and_utc();
        Self::new(noon)
    }

    pub fn set(&self, now: DateTime<Utc>) {
        if let Ok(mut guard) = self.now.lock() {
            *guard = now;
        }
    }

    pub fn advance_days(&self, days: i64) {
        if let Ok(mut guard) = self.now.lock() {
            *guard += chrono::Duration::days(days);
        }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }

    fn now(&self) -> DateTime<Utc> {
        self.now
            .lock()
            .map(|guard| *guard)
            .unwrap_or_else(|poisoned| *poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_today_string() {
        let clock = FixedClock::on(2024, 1, 1);
        assert_eq!(clock.today_string(), "2024-01-01");
    }

    #[test]
    fn test_fixed_clock_advance() {
        let clock = FixedClock::on(2024, 1, 31);
        clock.advance_days(1);
        assert_eq!(clock.today_string(), "2024-02-01");
    }
}
