// --- File: crates/ruangbook_booking/src/routes.rs ---

use crate::handlers::{
    availability_handler, booking_events_handler, booking_window_handler, create_booking_handler,
    health_handler, list_bookings_handler, reference_handler, schedule_handler,
    today_bookings_handler, tomorrow_bookings_handler, BookingState,
};
use axum::{routing::get, Router};
use std::sync::Arc;

/// Public booking routes, relative to `/api`.
pub fn routes(state: Arc<BookingState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/reference", get(reference_handler))
        .route("/booking-window", get(booking_window_handler))
        .route(
            "/bookings",
            get(list_bookings_handler).post(create_booking_handler),
        )
        .route("/bookings/today", get(today_bookings_handler))
        .route("/bookings/tomorrow", get(tomorrow_bookings_handler))
        .route("/bookings/events", get(booking_events_handler))
        .route("/availability", get(availability_handler))
        .route("/schedule", get(schedule_handler))
        .with_state(state)
}
