// --- File: crates/ruangbook_common/src/services.rs ---
//! Storage abstractions.
//!
//! The booking and admin crates only see these traits. The backend decides whether they
//! are backed by SQL or by the in-memory stores used for local runs and tests.

use chrono::{DateTime, NaiveDate, Utc};
use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::models::{AdminUser, Booking, BookingStatus, NewBooking, RoomType, UserRole};

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// A wrapper error type that implements std::error::Error for Box<dyn std::error::Error + Send + Sync>
#[derive(Debug)]
pub struct BoxedError(pub Box<dyn StdError + Send + Sync>);

impl fmt::Display for BoxedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StdError for BoxedError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.0.source()
    }
}

impl From<Box<dyn StdError + Send + Sync>> for BoxedError {
    fn from(err: Box<dyn StdError + Send + Sync>) -> Self {
        BoxedError(err)
    }
}

impl BoxedError {
    pub fn new<E: StdError + Send + Sync + 'static>(err: E) -> Self {
        BoxedError(Box::new(err))
    }
}

/// Sort order of a booking listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BookingOrder {
    /// `usage_date` asc, then `start_time` asc.
    #[default]
    UsageDateAsc,
    /// `usage_date` desc, then `start_time` asc. Dashboard order.
    UsageDateDesc,
}

/// Store-level filter. `None` means "any".
#[derive(Debug, Clone, Default)]
pub struct BookingQuery {
    pub usage_date: Option<NaiveDate>,
    pub room: Option<RoomType>,
    pub status: Option<BookingStatus>,
    pub order: BookingOrder,
}

impl BookingQuery {
    pub fn confirmed() -> Self {
        Self {
            status: Some(BookingStatus::Confirmed),
            ..Default::default()
        }
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.usage_date = Some(date);
        self
    }

    pub fn in_room(mut self, room: RoomType) -> Self {
        self.room = Some(room);
        self
    }

    pub fn ordered(mut self, order: BookingOrder) -> Self {
        self.order = order;
        self
    }

    pub fn matches(&self, booking: &Booking) -> bool {
        self.usage_date.is_none_or(|d| booking.usage_date == d)
            && self.room.is_none_or(|r| booking.room == r)
            && self.status.is_none_or(|s| booking.status == s)
    }
}

/// Sorts bookings the way `order` asks for. Shared by every store implementation.
pub fn sort_bookings(bookings: &mut [Booking], order: BookingOrder) {
    match order {
        BookingOrder::UsageDateAsc => bookings.sort_by(|a, b| {
            a.usage_date
                .cmp(&b.usage_date)
                .then_with(|| a.start_time.cmp(&b.start_time))
        }),
        BookingOrder::UsageDateDesc => bookings.sort_by(|a, b| {
            b.usage_date
                .cmp(&a.usage_date)
                .then_with(|| a.start_time.cmp(&b.start_time))
        }),
    }
}

/// A booking row ready to be written. Id and timestamps are assigned by the caller.
#[derive(Debug, Clone)]
pub struct BookingRecord {
    pub id: String,
    pub booking_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub data: NewBooking,
}

impl BookingRecord {
    pub fn into_booking(self) -> Booking {
        let NewBooking {
            usage_date,
            room,
            booker_name,
            department,
            participant_count,
            start_time,
            end_time,
            notes,
        } = self.data;
        Booking {
            id: self.id,
            booking_date: self.booking_date,
            usage_date,
            room,
            booker_name,
            department,
            participant_count,
            start_time,
            end_time,
            notes,
            status: BookingStatus::Confirmed,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}

/// Result of an atomic conflict check and insert.
#[derive(Debug, Clone)]
pub enum InsertOutcome {
    Inserted(Booking),
    /// Confirmed bookings that overlap the requested window. Nothing was written.
    Conflict(Vec<Booking>),
}

/// Result of a status change.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusUpdate {
    pub booking: Booking,
    /// `false` when the booking already had the requested status. Nothing was written.
    pub changed: bool,
}

/// Booking persistence.
pub trait BookingStore: Send + Sync {
    /// Error type returned by store operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Inserts `record` unless a confirmed booking of the same room and day overlaps it.
    /// Check and write happen as one step.
    fn insert_if_free(&self, record: BookingRecord) -> BoxFuture<'_, InsertOutcome, Self::Error>;

    fn find_by_id(&self, id: &str) -> BoxFuture<'_, Option<Booking>, Self::Error>;

    fn list(&self, query: BookingQuery) -> BoxFuture<'_, Vec<Booking>, Self::Error>;

    /// Sets the status and `updated_at` unless the booking already has that status.
    /// Check and write happen as one step. `None` when the id is unknown.
    fn set_status(
        &self,
        id: &str,
        status: BookingStatus,
        updated_at: DateTime<Utc>,
    ) -> BoxFuture<'_, Option<StatusUpdate>, Self::Error>;

    fn is_healthy(&self) -> BoxFuture<'_, bool, Self::Error>;
}

/// Dashboard account persistence.
pub trait AdminUserStore: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Creates the account. `None` when the email is already registered.
    fn create_user(
        &self,
        email: &str,
        password_hash: &str,
        role: UserRole,
    ) -> BoxFuture<'_, Option<AdminUser>, Self::Error>;

    fn find_by_email(&self, email: &str) -> BoxFuture<'_, Option<AdminUser>, Self::Error>;
}

/// Booking store as held by request handlers.
pub type DynBookingStore = Arc<dyn BookingStore<Error = BoxedError>>;

/// Account store as held by request handlers.
pub type DynAdminUserStore = Arc<dyn AdminUserStore<Error = BoxedError>>;
