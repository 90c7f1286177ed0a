// --- File: crates/ruangbook_booking/src/store.rs ---
//! In-memory booking store for local runs without a database and for tests.

use chrono::{DateTime, Utc};
use ruangbook_common::models::{Booking, BookingStatus};
use ruangbook_common::services::{
    sort_bookings, BookingQuery, BookingRecord, BookingStore, BoxFuture, BoxedError,
    InsertOutcome, StatusUpdate,
};
use std::sync::{Mutex, MutexGuard};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("booking store lock poisoned")]
struct PoisonedStore;

/// A vector behind a mutex. The conflict check and the push happen under one lock.
#[derive(Debug, Default)]
pub struct MemoryBookingStore {
    bookings: Mutex<Vec<Booking>>,
}

impl MemoryBookingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seeded store, mainly for tests.
    pub fn with_bookings(bookings: Vec<Booking>) -> Self {
        Self {
            bookings: Mutex::new(bookings),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Booking>>, BoxedError> {
        self.bookings
            .lock()
            .map_err(|_| BoxedError::new(PoisonedStore))
    }
}

impl BookingStore for MemoryBookingStore {
    type Error = BoxedError;

    fn insert_if_free(&self, record: BookingRecord) -> BoxFuture<'_, InsertOutcome, Self::Error> {
        Box::pin(async move {
            let mut bookings = self.lock()?;
            let conflicts: Vec<Booking> = bookings
                .iter()
                .filter(|b| b.conflicts_with(&record.data))
                .cloned()
                .collect();
            if !conflicts.is_empty() {
                return Ok(InsertOutcome::Conflict(conflicts));
            }
            let booking = record.into_booking();
            bookings.push(booking.clone());
            Ok(InsertOutcome::Inserted(booking))
        })
    }

    fn find_by_id(&self, id: &str) -> BoxFuture<'_, Option<Booking>, Self::Error> {
        let id = id.to_string();
        Box::pin(async move {
            let bookings = self.lock()?;
            Ok(bookings.iter().find(|b| b.id == id).cloned())
        })
    }

    fn list(&self, query: BookingQuery) -> BoxFuture<'_, Vec<Booking>, Self::Error> {
        Box::pin(async move {
            let mut matching: Vec<Booking> = {
                let bookings = self.lock()?;
                bookings.iter().filter(|b| query.matches(b)).cloned().collect()
            };
            sort_bookings(&mut matching, query.order);
            Ok(matching)
        })
    }

    fn set_status(
        &self,
        id: &str,
        status: BookingStatus,
        updated_at: DateTime<Utc>,
    ) -> BoxFuture<'_, Option<StatusUpdate>, Self::Error> {
        let id = id.to_string();
        Box::pin(async move {
            let mut bookings = self.lock()?;
            Ok(bookings.iter_mut().find(|b| b.id == id).map(|b| {
                let changed = b.status != status;
                if changed {
                    b.status = status;
                    b.updated_at = updated_at;
                }
                StatusUpdate {
                    booking: b.clone(),
                    changed,
                }
            }))
        })
    }

    fn is_healthy(&self) -> BoxFuture<'_, bool, Self::Error> {
        Box::pin(async move { Ok(self.bookings.lock().is_ok()) })
    }
}
