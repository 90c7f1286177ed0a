//! Repository for room bookings

use crate::error::DbError;
use ruangbook_common::models::{Booking, BookingStatus};
use ruangbook_common::services::{BookingQuery, BookingRecord, InsertOutcome, StatusUpdate};

use chrono::{DateTime, Utc};

/// Storage for bookings.
///
/// Cancelled bookings stay in the table; only their status changes.
pub trait BookingRepository {
    /// Create the `bookings` table and its indexes if they don't exist.
    fn init_schema(&self) -> impl std::future::Future<Output = Result<(), DbError>> + Send;

    /// Insert the record unless a confirmed booking of the same room and day overlaps it.
    ///
    /// The overlap check is part of the insert statement, so two concurrent requests for
    /// the same slot cannot both succeed.
    fn insert_if_free(
        &self,
        record: BookingRecord,
    ) -> impl std::future::Future<Output = Result<InsertOutcome, DbError>> + Send;

    fn find_by_id(
        &self,
        id: &str,
    ) -> impl std::future::Future<Output = Result<Option<Booking>, DbError>> + Send;

    fn list(
        &self,
        query: BookingQuery,
    ) -> impl std::future::Future<Output = Result<Vec<Booking>, DbError>> + Send;

    /// Updates only when the status differs, in one statement. `None` if the id is unknown.
    fn set_status(
        &self,
        id: &str,
        status: BookingStatus,
        updated_at: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<Option<StatusUpdate>, DbError>> + Send;
}
