// --- File: crates/ruangbook_booking/src/schedule.rs ---
//! Room × hour grid for one day.

use chrono::{DateTime, NaiveDate, Utc};
use ruangbook_common::models::{start_times, Booking, Department, RoomType};
use serde::Serialize;

use crate::window::BookingWindow;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum CellState {
    Available,
    Booked,
}

/// What a booked cell shows.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BookingSummary {
    pub booking_id: String,
    pub booker_name: String,
    pub department: Department,
    pub participant_count: u32,
    /// `HH:MM - HH:MM`
    pub time_range: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ScheduleCell {
    pub slot: String,
    pub state: CellState,
    pub past: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking: Option<BookingSummary>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ScheduleRow {
    pub room: RoomType,
    pub room_label: String,
    pub cells: Vec<ScheduleCell>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Schedule {
    pub date: NaiveDate,
    pub slots: Vec<String>,
    pub rows: Vec<ScheduleRow>,
}

/// Lays `bookings` out on the grid for `date`. Cancelled bookings and other dates are
/// ignored, so the caller may pass an unfiltered list.
pub fn build_schedule(
    bookings: &[Booking],
    date: NaiveDate,
    now: DateTime<Utc>,
    window: &BookingWindow,
) -> Schedule {
    let relevant: Vec<&Booking> = bookings
        .iter()
        .filter(|b| b.is_confirmed() && b.usage_date == date)
        .collect();

    let rows = RoomType::ALL
        .iter()
        .map(|&room| ScheduleRow {
            room,
            room_label: room.label().to_string(),
            cells: start_times()
                .iter()
                .map(|&slot| {
                    let holder = relevant.iter().find(|b| b.occupies(room, slot));
                    ScheduleCell {
                        slot: slot.to_string(),
                        state: if holder.is_some() {
                            CellState::Booked
                        } else {
                            CellState::Available
                        },
                        past: window.is_slot_past(now, date, slot),
                        booking: holder.map(|b| summarize(b)),
                    }
                })
                .collect(),
        })
        .collect();

    Schedule {
        date,
        slots: start_times().iter().map(|s| s.to_string()).collect(),
        rows,
    }
}

fn summarize(booking: &Booking) -> BookingSummary {
    BookingSummary {
        booking_id: booking.id.clone(),
        booker_name: booking.booker_name.clone(),
        department: booking.department,
        participant_count: booking.participant_count,
        time_range: booking.time_range(),
        notes: booking.notes.clone(),
    }
}
