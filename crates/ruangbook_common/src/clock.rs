// --- File: crates/ruangbook_common/src/clock.rs ---
//! Time source abstraction.
//!
//! Booking window and "past slot" decisions depend on the current time, so handlers
//! receive a [`Clock`] instead of calling `Utc::now()` directly.

use chrono::{DateTime, Utc};
use std::sync::Mutex;

/// Source of the current instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to. Used by tests.
#[derive(Debug)]
pub struct FixedClock {
    instant: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self {
            instant: Mutex::new(instant),
        }
    }

    pub fn set(&self, instant: DateTime<Utc>) {
        match self.instant.lock() {
            Ok(mut guard) => *guard = instant,
            Err(poisoned) => *poisoned.into_inner() = instant,
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        match self.instant.lock() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn fixed_clock_returns_the_set_instant() {
        let first = Utc.with_ymd_and_hms(2025, 3, 10, 1, 0, 0).unwrap();
        let clock = FixedClock::new(first);
        assert_eq!(clock.now(), first);

        let later = Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap();
        clock.set(later);
        assert_eq!(clock.now(), later);
    }
}
