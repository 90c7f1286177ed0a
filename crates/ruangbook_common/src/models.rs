// --- File: crates/ruangbook_common/src/models.rs ---

// Domain types shared by the store, the booking API and the admin dashboard.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Hourly grid the office books on.
pub const TIME_SLOTS: [&str; 9] = [
    "08:00", "09:00", "10:00", "11:00", "12:00", "13:00", "14:00", "15:00", "16:00",
];

/// A booking may start at any slot except the last one.
pub fn start_times() -> &'static [&'static str] {
    &TIME_SLOTS[..TIME_SLOTS.len() - 1]
}

/// A booking may end at any slot except the first one.
pub fn end_times() -> &'static [&'static str] {
    &TIME_SLOTS[1..]
}

/// Hour component of an `HH:MM` slot.
pub fn slot_hour(slot: &str) -> Option<u32> {
    let (hour, minute) = slot.split_once(':')?;
    if hour.len() != 2 || minute.len() != 2 {
        return None;
    }
    minute.parse::<u32>().ok()?;
    hour.parse().ok()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum RoomType {
    #[serde(rename = "ruang_diskusi_1")]
    RuangDiskusi1,
    #[serde(rename = "ruang_diskusi_2")]
    RuangDiskusi2,
    #[serde(rename = "ruang_diskusi_3")]
    RuangDiskusi3,
}

impl RoomType {
    /// Display order of the schedule grid and the dashboard statistics.
    pub const ALL: [RoomType; 3] = [
        RoomType::RuangDiskusi1,
        RoomType::RuangDiskusi2,
        RoomType::RuangDiskusi3,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoomType::RuangDiskusi1 => "ruang_diskusi_1",
            RoomType::RuangDiskusi2 => "ruang_diskusi_2",
            RoomType::RuangDiskusi3 => "ruang_diskusi_3",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RoomType::RuangDiskusi1 => "Ruang Diskusi 1",
            RoomType::RuangDiskusi2 => "Ruang Diskusi 2",
            RoomType::RuangDiskusi3 => "Ruang Diskusi 3",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|room| room.as_str() == value)
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum Department {
    #[serde(rename = "IT")]
    It,
    #[serde(rename = "HR")]
    Hr,
    Marketing,
    Finance,
    Operations,
}

impl Department {
    pub const ALL: [Department; 5] = [
        Department::It,
        Department::Hr,
        Department::Marketing,
        Department::Finance,
        Department::Operations,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Department::It => "IT",
            Department::Hr => "HR",
            Department::Marketing => "Marketing",
            Department::Finance => "Finance",
            Department::Operations => "Operations",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|dept| dept.as_str() == value)
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "confirmed" => Some(BookingStatus::Confirmed),
            "cancelled" => Some(BookingStatus::Cancelled),
            _ => None,
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored room booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Booking {
    pub id: String,
    /// Local date the booking was made on.
    pub booking_date: NaiveDate,
    pub usage_date: NaiveDate,
    pub room: RoomType,
    pub booker_name: String,
    pub department: Department,
    pub participant_count: u32,
    /// `HH:MM`
    pub start_time: String,
    /// `HH:MM`, exclusive
    pub end_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated form data for a booking that does not exist yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBooking {
    pub usage_date: NaiveDate,
    pub room: RoomType,
    pub booker_name: String,
    pub department: Department,
    pub participant_count: u32,
    pub start_time: String,
    pub end_time: String,
    pub notes: Option<String>,
}

/// Half-open interval overlap on zero-padded `HH:MM` strings.
pub fn windows_overlap(a_start: &str, a_end: &str, b_start: &str, b_end: &str) -> bool {
    a_start < b_end && a_end > b_start
}

impl Booking {
    pub fn is_confirmed(&self) -> bool {
        self.status == BookingStatus::Confirmed
    }

    /// True when `[start, end)` intersects this booking's time window.
    pub fn overlaps(&self, start: &str, end: &str) -> bool {
        windows_overlap(&self.start_time, &self.end_time, start, end)
    }

    /// A confirmed booking of the same room and day whose window intersects the request.
    pub fn conflicts_with(&self, candidate: &NewBooking) -> bool {
        self.is_confirmed()
            && self.room == candidate.room
            && self.usage_date == candidate.usage_date
            && self.overlaps(&candidate.start_time, &candidate.end_time)
    }

    /// Schedule cell predicate: the room is held at `slot`.
    pub fn occupies(&self, room: RoomType, slot: &str) -> bool {
        self.room == room && self.start_time.as_str() <= slot && slot < self.end_time.as_str()
    }

    /// `HH:MM - HH:MM`
    pub fn time_range(&self) -> String {
        format!("{} - {}", self.start_time, self.end_time)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    User,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::User => "user",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "admin" => Some(UserRole::Admin),
            "user" => Some(UserRole::User),
            _ => None,
        }
    }
}

/// A dashboard account.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminUser {
    pub id: String,
    pub email: String,
    /// PHC-style `pbkdf2-sha256$iterations$salt$hash`
    pub password_hash: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}
