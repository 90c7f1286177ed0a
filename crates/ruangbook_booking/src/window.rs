// --- File: crates/ruangbook_booking/src/window.rs ---
//! Which usage dates can be booked right now.
//!
//! Today can be booked until the closing hour, for slots that have not started yet.
//! Tomorrow opens at the daily cutoff (15:30 by default). Everything is evaluated in the
//! office time zone, never in UTC.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Timelike, Utc};
use chrono_tz::Tz;
use ruangbook_common::models::slot_hour;
use ruangbook_config::BookingConfig;
use serde::Serialize;
use std::str::FromStr;

use crate::logic::BookingError;

/// Remaining time until next-day booking opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Countdown {
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingWindow {
    time_zone: Tz,
    cutoff: NaiveTime,
    closing_hour: u32,
}

impl BookingWindow {
    pub fn new(time_zone: Tz, cutoff: NaiveTime, closing_hour: u32) -> Self {
        Self {
            time_zone,
            cutoff,
            closing_hour,
        }
    }

    /// Build the window from the `[booking]` section.
    pub fn from_config(config: &BookingConfig) -> Result<Self, BookingError> {
        let time_zone = Tz::from_str(&config.time_zone).map_err(|e| {
            BookingError::Config(format!("invalid time zone '{}': {}", config.time_zone, e))
        })?;
        let cutoff = NaiveTime::parse_from_str(&config.cutoff_time, "%H:%M").map_err(|e| {
            BookingError::Config(format!("invalid cutoff '{}': {}", config.cutoff_time, e))
        })?;
        if config.same_day_closing_hour > 24 {
            return Err(BookingError::Config(format!(
                "invalid closing hour {}",
                config.same_day_closing_hour
            )));
        }
        Ok(Self::new(time_zone, cutoff, config.same_day_closing_hour))
    }

    pub fn time_zone(&self) -> Tz {
        self.time_zone
    }

    /// `HH:MM`
    pub fn cutoff_label(&self) -> String {
        self.cutoff.format("%H:%M").to_string()
    }

    pub fn closing_hour(&self) -> u32 {
        self.closing_hour
    }

    pub fn local(&self, now: DateTime<Utc>) -> DateTime<Tz> {
        now.with_timezone(&self.time_zone)
    }

    pub fn today(&self, now: DateTime<Utc>) -> NaiveDate {
        self.local(now).date_naive()
    }

    pub fn tomorrow(&self, now: DateTime<Utc>) -> NaiveDate {
        self.today(now) + Duration::days(1)
    }

    /// Next-day booking is open from the cutoff instant (inclusive) until midnight.
    pub fn is_open(&self, now: DateTime<Utc>) -> bool {
        self.local(now).time() >= self.cutoff
    }

    /// `None` once the window is open.
    pub fn time_until_open(&self, now: DateTime<Utc>) -> Option<Countdown> {
        let local_time = self.local(now).time();
        if local_time >= self.cutoff {
            return None;
        }
        let remaining = (self.cutoff - local_time).num_seconds();
        Some(Countdown {
            hours: remaining / 3600,
            minutes: (remaining % 3600) / 60,
            seconds: remaining % 60,
        })
    }

    /// True for today's slots whose hour has started or passed.
    pub fn is_slot_past(&self, now: DateTime<Utc>, date: NaiveDate, slot: &str) -> bool {
        if date != self.today(now) {
            return false;
        }
        let current_hour = self.local(now).hour();
        slot_hour(slot).is_some_and(|hour| hour <= current_hour)
    }

    /// Whether a booking for `date` starting at `start_time` may be submitted at `now`.
    pub fn check_usage_date(
        &self,
        now: DateTime<Utc>,
        date: NaiveDate,
        start_time: &str,
    ) -> Result<(), BookingError> {
        let today = self.today(now);
        let tomorrow = self.tomorrow(now);

        if date < today || date > tomorrow {
            return Err(BookingError::DateOutOfRange(date));
        }
        if date == tomorrow {
            if !self.is_open(now) {
                return Err(BookingError::WindowClosed {
                    opens_at: self.cutoff_label(),
                });
            }
            return Ok(());
        }
        if self.local(now).hour() >= self.closing_hour {
            return Err(BookingError::SameDayClosed);
        }
        if self.is_slot_past(now, date, start_time) {
            return Err(BookingError::SlotInPast(start_time.to_string()));
        }
        Ok(())
    }

    /// Dates a booking could be submitted for at `now`, earliest first.
    pub fn bookable_dates(&self, now: DateTime<Utc>) -> Vec<NaiveDate> {
        let mut dates = Vec::with_capacity(2);
        if self.local(now).hour() < self.closing_hour {
            dates.push(self.today(now));
        }
        if self.is_open(now) {
            dates.push(self.tomorrow(now));
        }
        dates
    }
}

impl Default for BookingWindow {
    fn default() -> Self {
        Self::new(
            chrono_tz::Asia::Jakarta,
            NaiveTime::from_hms_opt(15, 30, 0).unwrap_or(NaiveTime::MIN),
            16,
        )
    }
}
