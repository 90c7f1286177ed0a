// File: crates/ruangbook_booking/src/doc.rs

#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::handlers::{BookingListResponse, BookingWindowResponse, HealthResponse};
use crate::logic::{AvailabilityResponse, BookingRequest, Choice, ReferenceData};
use crate::notify::{BookingChange, ChangeKind};
use crate::schedule::{BookingSummary, CellState, Schedule, ScheduleCell, ScheduleRow};
use crate::window::Countdown;
use ruangbook_common::models::{Booking, BookingStatus, Department, RoomType};
use ruangbook_common::FieldError;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health_handler,
        crate::handlers::reference_handler,
        crate::handlers::booking_window_handler,
        crate::handlers::list_bookings_handler,
        crate::handlers::today_bookings_handler,
        crate::handlers::tomorrow_bookings_handler,
        crate::handlers::availability_handler,
        crate::handlers::create_booking_handler,
        crate::handlers::schedule_handler,
        crate::handlers::booking_events_handler
    ),
    components(
        schemas(
            Booking,
            BookingStatus,
            RoomType,
            Department,
            BookingRequest,
            FieldError,
            AvailabilityResponse,
            ReferenceData,
            Choice,
            HealthResponse,
            BookingWindowResponse,
            Countdown,
            BookingListResponse,
            Schedule,
            ScheduleRow,
            ScheduleCell,
            CellState,
            BookingSummary,
            BookingChange,
            ChangeKind
        )
    ),
    tags(
        (name = "Booking", description = "Public room booking API")
    ),
    servers(
        (url = "/api", description = "RuangBook API server")
    )
)]
pub struct BookingApiDoc;
