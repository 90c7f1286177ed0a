// --- File: crates/ruangbook_booking/src/logic.rs ---
use chrono::{DateTime, NaiveDate, Utc};
use ruangbook_common::models::{
    end_times, start_times, Booking, Department, NewBooking, RoomType,
};
use ruangbook_common::services::{
    BookingQuery, BookingRecord, BookingStore, BoxedError, InsertOutcome,
};
use ruangbook_common::{FieldError, RuangbookError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::window::BookingWindow;

pub const CONFLICT_MESSAGE: &str = "Ruang sudah dibooking pada jam tersebut";

const NAME_MIN: usize = 2;
const NAME_MAX: usize = 100;
const PARTICIPANTS_MIN: i64 = 1;
const PARTICIPANTS_MAX: i64 = 20;
const NOTES_MAX: usize = 500;

// --- Error Handling ---
#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Data booking tidak valid")]
    Validation(Vec<FieldError>),
    #[error("Tanggal {0} tidak dapat dibooking")]
    DateOutOfRange(NaiveDate),
    #[error("Booking untuk besok dibuka pukul {opens_at}")]
    WindowClosed { opens_at: String },
    #[error("Booking untuk hari ini sudah ditutup")]
    SameDayClosed,
    #[error("Jam {0} sudah lewat")]
    SlotInPast(String),
    #[error("{}", CONFLICT_MESSAGE)]
    Conflict(Vec<Booking>),
    #[error("Invalid query: {0}")]
    InvalidQuery(String),
    #[error("Booking configuration error: {0}")]
    Config(String),
    #[error("Booking store error: {0}")]
    Store(#[from] BoxedError),
}

impl From<BookingError> for RuangbookError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::Validation(fields) => RuangbookError::FieldValidation(fields),
            BookingError::InvalidQuery(msg) => RuangbookError::ValidationError(msg),
            BookingError::Conflict(_) => RuangbookError::ConflictError(CONFLICT_MESSAGE.to_string()),
            BookingError::Config(msg) => RuangbookError::ConfigError(msg),
            BookingError::Store(e) => RuangbookError::DatabaseError(e.to_string()),
            rule @ (BookingError::DateOutOfRange(_)
            | BookingError::WindowClosed { .. }
            | BookingError::SameDayClosed
            | BookingError::SlotInPast(_)) => RuangbookError::RuleViolation(rule.to_string()),
        }
    }
}

// --- Data Structures ---

/// Booking form as submitted. Every field is optional on the wire so that missing
/// values come back as field errors instead of a body rejection.
#[derive(Deserialize, Debug, Clone, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(default)]
pub struct BookingRequest {
    #[cfg_attr(feature = "openapi", schema(example = "Sari Wulandari"))]
    pub booker_name: String,
    #[cfg_attr(feature = "openapi", schema(example = "IT"))]
    pub department: String,
    #[cfg_attr(feature = "openapi", schema(example = 6))]
    pub participant_count: i64,
    #[cfg_attr(feature = "openapi", schema(format = "date", example = "2025-03-11"))]
    pub usage_date: String,
    #[cfg_attr(feature = "openapi", schema(example = "09:00"))]
    pub start_time: String,
    #[cfg_attr(feature = "openapi", schema(example = "11:00"))]
    pub end_time: String,
    #[cfg_attr(feature = "openapi", schema(example = "ruang_diskusi_1"))]
    pub room: String,
    pub notes: Option<String>,
}

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams, utoipa::ToSchema))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct AvailabilityQuery {
    /// YYYY-MM-DD
    pub usage_date: String,
    pub start_time: String,
    pub end_time: String,
    pub room: String,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AvailabilityResponse {
    pub available: bool,
}

#[derive(Deserialize, Debug, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams, utoipa::ToSchema))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct DateQuery {
    /// YYYY-MM-DD; absent means "all" for listings and "today" for the schedule.
    pub date: Option<String>,
}

#[derive(Serialize, Debug, Clone)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Choice {
    pub value: String,
    pub label: String,
}

/// Everything a booking form needs to render its selects.
#[derive(Serialize, Debug, Clone)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ReferenceData {
    pub rooms: Vec<Choice>,
    pub departments: Vec<Choice>,
    pub start_times: Vec<String>,
    pub end_times: Vec<String>,
    pub cutoff_time: String,
    pub time_zone: String,
}

// --- Validation ---

/// Turns a submitted form into a typed booking, collecting every field error.
pub fn validate_new_booking(request: &BookingRequest) -> Result<NewBooking, Vec<FieldError>> {
    let mut errors = Vec::new();

    let booker_name = request.booker_name.trim().to_string();
    let name_len = booker_name.chars().count();
    if name_len < NAME_MIN {
        errors.push(FieldError::new("booker_name", "Nama minimal 2 karakter"));
    } else if name_len > NAME_MAX {
        errors.push(FieldError::new("booker_name", "Nama maksimal 100 karakter"));
    }

    let department = Department::parse(request.department.trim());
    if department.is_none() {
        errors.push(FieldError::new("department", "Pilih unit kerja"));
    }

    if request.participant_count < PARTICIPANTS_MIN {
        errors.push(FieldError::new("participant_count", "Minimal 1 peserta"));
    } else if request.participant_count > PARTICIPANTS_MAX {
        errors.push(FieldError::new("participant_count", "Maksimal 20 peserta"));
    }

    let usage_date = NaiveDate::parse_from_str(request.usage_date.trim(), "%Y-%m-%d").ok();
    if usage_date.is_none() {
        errors.push(FieldError::new("usage_date", "Pilih tanggal"));
    }

    let start_time = request.start_time.trim();
    let start_ok = start_times().contains(&start_time);
    if !start_ok {
        errors.push(FieldError::new("start_time", "Pilih jam mulai"));
    }

    let end_time = request.end_time.trim();
    let end_ok = end_times().contains(&end_time);
    if !end_ok {
        errors.push(FieldError::new("end_time", "Pilih jam selesai"));
    } else if start_ok && end_time <= start_time {
        errors.push(FieldError::new("end_time", "Jam selesai harus setelah jam mulai"));
    }

    let room = RoomType::parse(request.room.trim());
    if room.is_none() {
        errors.push(FieldError::new("room", "Pilih ruang diskusi"));
    }

    let notes = request
        .notes
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string);
    if notes.as_ref().is_some_and(|n| n.chars().count() > NOTES_MAX) {
        errors.push(FieldError::new("notes", "Keterangan maksimal 500 karakter"));
    }

    match (usage_date, room, department) {
        (Some(usage_date), Some(room), Some(department)) if errors.is_empty() => Ok(NewBooking {
            usage_date,
            room,
            booker_name,
            department,
            // Range checked above.
            participant_count: request.participant_count as u32,
            start_time: start_time.to_string(),
            end_time: end_time.to_string(),
            notes,
        }),
        _ => Err(errors),
    }
}

/// Parses an optional `YYYY-MM-DD` query value.
pub fn parse_date_param(value: Option<&str>) -> Result<Option<NaiveDate>, BookingError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(v) => NaiveDate::parse_from_str(v, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| BookingError::InvalidQuery(format!("Invalid date '{}' (YYYY-MM-DD)", v))),
    }
}

// --- Operations ---

/// Validate, check the booking window, then insert if the slot is still free.
pub async fn create_booking<S>(
    store: &S,
    window: &BookingWindow,
    now: DateTime<Utc>,
    request: &BookingRequest,
) -> Result<Booking, BookingError>
where
    S: BookingStore<Error = BoxedError> + ?Sized,
{
    let new_booking = validate_new_booking(request).map_err(BookingError::Validation)?;
    window.check_usage_date(now, new_booking.usage_date, &new_booking.start_time)?;

    let record = BookingRecord {
        id: uuid::Uuid::new_v4().to_string(),
        booking_date: window.today(now),
        created_at: now,
        data: new_booking,
    };

    match store.insert_if_free(record).await? {
        InsertOutcome::Inserted(booking) => {
            info!(
                id = %booking.id,
                room = %booking.room,
                usage_date = %booking.usage_date,
                "Booking created {}",
                booking.time_range()
            );
            Ok(booking)
        }
        InsertOutcome::Conflict(conflicts) => {
            warn!("Booking rejected, {} overlapping booking(s)", conflicts.len());
            Err(BookingError::Conflict(conflicts))
        }
    }
}

/// True when no confirmed booking of the room overlaps `[start, end)` on `date`.
pub async fn check_availability<S>(
    store: &S,
    query: &AvailabilityQuery,
) -> Result<bool, BookingError>
where
    S: BookingStore<Error = BoxedError> + ?Sized,
{
    let date = parse_date_param(Some(&query.usage_date))?
        .ok_or_else(|| BookingError::InvalidQuery("usage_date is required".to_string()))?;
    let room = RoomType::parse(&query.room)
        .ok_or_else(|| BookingError::InvalidQuery(format!("Unknown room '{}'", query.room)))?;
    if !start_times().contains(&query.start_time.as_str())
        || !end_times().contains(&query.end_time.as_str())
    {
        return Err(BookingError::InvalidQuery(
            "start_time/end_time must be grid slots".to_string(),
        ));
    }

    let existing = store
        .list(BookingQuery::confirmed().on(date).in_room(room))
        .await?;
    let available = !existing
        .iter()
        .any(|b| b.overlaps(&query.start_time, &query.end_time));
    debug!(%room, %date, available, "Availability checked");
    Ok(available)
}

/// Confirmed bookings of one date by start time, or all confirmed bookings by date then
/// start time.
pub async fn list_confirmed<S>(store: &S, date: Option<NaiveDate>) -> Result<Vec<Booking>, BookingError>
where
    S: BookingStore<Error = BoxedError> + ?Sized,
{
    let query = match date {
        Some(date) => BookingQuery::confirmed().on(date),
        None => BookingQuery::confirmed(),
    };
    Ok(store.list(query).await?)
}

pub fn reference_data(window: &BookingWindow) -> ReferenceData {
    ReferenceData {
        rooms: RoomType::ALL
            .iter()
            .map(|room| Choice {
                value: room.as_str().to_string(),
                label: room.label().to_string(),
            })
            .collect(),
        departments: Department::ALL
            .iter()
            .map(|dept| Choice {
                value: dept.as_str().to_string(),
                label: dept.as_str().to_string(),
            })
            .collect(),
        start_times: start_times().iter().map(|s| s.to_string()).collect(),
        end_times: end_times().iter().map(|s| s.to_string()).collect(),
        cutoff_time: window.cutoff_label(),
        time_zone: window.time_zone().name().to_string(),
    }
}
