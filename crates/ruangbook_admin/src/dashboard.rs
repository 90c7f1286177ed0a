// --- File: crates/ruangbook_admin/src/dashboard.rs ---
//! Booking management for the admin dashboard.

use chrono::{DateTime, NaiveDate, Utc};
use ruangbook_common::models::{Booking, BookingStatus, Department, RoomType};
use ruangbook_common::services::{BookingOrder, BookingQuery, BookingStore, BoxedError};
use ruangbook_common::RuangbookError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

const ALL: &str = "all";

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),
    #[error("Booking {0} tidak ditemukan")]
    NotFound(String),
    #[error("Booking store error: {0}")]
    Store(#[from] BoxedError),
}

impl From<DashboardError> for RuangbookError {
    fn from(err: DashboardError) -> Self {
        match err {
            DashboardError::InvalidFilter(msg) => RuangbookError::ValidationError(msg),
            DashboardError::NotFound(_) => RuangbookError::NotFoundError(err.to_string()),
            DashboardError::Store(e) => RuangbookError::DatabaseError(e.to_string()),
        }
    }
}

/// Dashboard filter as it arrives in the query string. `all` or absent means no filter.
#[derive(Deserialize, Debug, Default, Clone)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams, utoipa::ToSchema))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct FilterQuery {
    /// Case-insensitive match on booker name or department.
    pub search: Option<String>,
    pub room: Option<String>,
    pub department: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct BookingFilter {
    pub search: Option<String>,
    pub room: Option<RoomType>,
    pub department: Option<Department>,
    pub status: Option<BookingStatus>,
}

fn selected(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty() && *v != ALL)
}

impl BookingFilter {
    pub fn from_query(query: &FilterQuery) -> Result<Self, DashboardError> {
        let room = selected(query.room.as_deref())
            .map(|v| {
                RoomType::parse(v)
                    .ok_or_else(|| DashboardError::InvalidFilter(format!("unknown room '{}'", v)))
            })
            .transpose()?;
        let department = selected(query.department.as_deref())
            .map(|v| {
                Department::parse(v).ok_or_else(|| {
                    DashboardError::InvalidFilter(format!("unknown department '{}'", v))
                })
            })
            .transpose()?;
        let status = selected(query.status.as_deref())
            .map(|v| {
                BookingStatus::parse(v)
                    .ok_or_else(|| DashboardError::InvalidFilter(format!("unknown status '{}'", v)))
            })
            .transpose()?;
        let search = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        Ok(Self {
            search,
            room,
            department,
            status,
        })
    }

    pub fn matches(&self, booking: &Booking) -> bool {
        let matches_search = self.search.as_deref().is_none_or(|term| {
            booking.booker_name.to_lowercase().contains(term)
                || booking.department.as_str().to_lowercase().contains(term)
        });
        matches_search
            && self.room.is_none_or(|r| booking.room == r)
            && self.department.is_none_or(|d| booking.department == d)
            && self.status.is_none_or(|s| booking.status == s)
    }
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DashboardList {
    /// Number of bookings before filtering.
    pub total: usize,
    pub bookings: Vec<Booking>,
}

#[derive(Serialize, Debug, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RoomStat {
    pub room: RoomType,
    pub label: String,
    pub count: usize,
    pub percentage: u32,
}

#[derive(Serialize, Debug, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DashboardStats {
    pub date: NaiveDate,
    pub today_confirmed: usize,
    pub total_confirmed: usize,
    pub rooms: Vec<RoomStat>,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CancelResponse {
    pub booking: Booking,
    /// False when the booking was already cancelled.
    pub changed: bool,
}

/// Every booking, newest usage date first.
pub async fn all_bookings<S>(store: &S) -> Result<Vec<Booking>, DashboardError>
where
    S: BookingStore<Error = BoxedError> + ?Sized,
{
    let query = BookingQuery::default().ordered(BookingOrder::UsageDateDesc);
    Ok(store.list(query).await?)
}

pub fn apply_filter(bookings: Vec<Booking>, filter: &BookingFilter) -> DashboardList {
    let total = bookings.len();
    let bookings: Vec<Booking> = bookings.into_iter().filter(|b| filter.matches(b)).collect();
    debug!(total, shown = bookings.len(), "Filtered dashboard bookings");
    DashboardList { total, bookings }
}

pub async fn list_bookings<S>(store: &S, filter: &BookingFilter) -> Result<DashboardList, DashboardError>
where
    S: BookingStore<Error = BoxedError> + ?Sized,
{
    let bookings = all_bookings(store).await?;
    Ok(apply_filter(bookings, filter))
}

fn percentage(count: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (count as f64 * 100.0 / total as f64).round() as u32
}

pub fn compute_stats(bookings: &[Booking], today: NaiveDate) -> DashboardStats {
    let confirmed: Vec<&Booking> = bookings.iter().filter(|b| b.is_confirmed()).collect();
    let total_confirmed = confirmed.len();
    let today_confirmed = confirmed.iter().filter(|b| b.usage_date == today).count();

    let rooms = RoomType::ALL
        .iter()
        .map(|&room| {
            let count = confirmed.iter().filter(|b| b.room == room).count();
            RoomStat {
                room,
                label: room.label().to_string(),
                count,
                percentage: percentage(count, total_confirmed),
            }
        })
        .collect();

    DashboardStats {
        date: today,
        today_confirmed,
        total_confirmed,
        rooms,
    }
}

/// Marks the booking cancelled. Cancelling twice leaves the first cancellation untouched,
/// also when two requests race: only one of them reports `changed`.
pub async fn cancel_booking<S>(
    store: &S,
    id: &str,
    now: DateTime<Utc>,
) -> Result<CancelResponse, DashboardError>
where
    S: BookingStore<Error = BoxedError> + ?Sized,
{
    let update = store
        .set_status(id, BookingStatus::Cancelled, now)
        .await?
        .ok_or_else(|| DashboardError::NotFound(id.to_string()))?;
    if update.changed {
        info!(booking_id = id, room = update.booking.room.as_str(), "Booking cancelled");
    } else {
        debug!(booking_id = id, "Booking already cancelled");
    }
    Ok(CancelResponse {
        booking: update.booking,
        changed: update.changed,
    })
}
