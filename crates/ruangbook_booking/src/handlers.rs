// File: crates/ruangbook_booking/src/handlers.rs
use crate::logic::{
    check_availability, create_booking, list_confirmed, parse_date_param, reference_data,
    AvailabilityQuery, AvailabilityResponse, BookingError, BookingRequest, DateQuery,
    ReferenceData,
};
use crate::notify::{BookingNotifier, ChangeKind};
use crate::schedule::{build_schedule, Schedule};
use crate::window::{BookingWindow, Countdown};
use axum::{
    extract::State,
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        Json,
    },
};
use chrono::NaiveDate;
use futures::stream::{self, Stream};
use ruangbook_common::models::Booking;
use ruangbook_common::services::DynBookingStore;
use ruangbook_common::{ApiJson, ApiQuery, Clock, RuangbookError};
use ruangbook_config::AppConfig;
use serde::Serialize;
use std::convert::Infallible;
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};

// Shared state of the public booking routes
#[derive(Clone)]
pub struct BookingState {
    pub config: Arc<AppConfig>,
    pub store: DynBookingStore,
    pub notifier: Arc<BookingNotifier>,
    pub clock: Arc<dyn Clock>,
    pub window: BookingWindow,
}

impl BookingState {
    pub fn new(
        config: Arc<AppConfig>,
        store: DynBookingStore,
        notifier: Arc<BookingNotifier>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, BookingError> {
        let window = BookingWindow::from_config(&config.booking)?;
        Ok(Self {
            config,
            store,
            notifier,
            clock,
            window,
        })
    }
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct HealthResponse {
    pub status: String,
    pub store_healthy: bool,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BookingWindowResponse {
    pub is_open: bool,
    pub cutoff_time: String,
    pub time_until_open: Option<Countdown>,
    pub today: NaiveDate,
    pub tomorrow: NaiveDate,
    pub bookable_dates: Vec<NaiveDate>,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BookingListResponse {
    pub date: Option<NaiveDate>,
    pub bookings: Vec<Booking>,
}

#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service and store health", body = HealthResponse)),
    tag = "Booking"
))]
pub async fn health_handler(State(state): State<Arc<BookingState>>) -> Json<HealthResponse> {
    let store_healthy = state.store.is_healthy().await.unwrap_or(false);
    Json(HealthResponse {
        status: if store_healthy { "ok" } else { "degraded" }.to_string(),
        store_healthy,
    })
}

#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/reference",
    responses((status = 200, description = "Rooms, departments and time slots", body = ReferenceData)),
    tag = "Booking"
))]
pub async fn reference_handler(State(state): State<Arc<BookingState>>) -> Json<ReferenceData> {
    Json(reference_data(&state.window))
}

#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/booking-window",
    responses((status = 200, description = "Whether next-day booking is open", body = BookingWindowResponse)),
    tag = "Booking"
))]
pub async fn booking_window_handler(
    State(state): State<Arc<BookingState>>,
) -> Json<BookingWindowResponse> {
    let now = state.clock.now();
    let window = &state.window;
    Json(BookingWindowResponse {
        is_open: window.is_open(now),
        cutoff_time: window.cutoff_label(),
        time_until_open: window.time_until_open(now),
        today: window.today(now),
        tomorrow: window.tomorrow(now),
        bookable_dates: window.bookable_dates(now),
    })
}

#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/bookings",
    params(DateQuery),
    responses(
        (status = 200, description = "Confirmed bookings", body = BookingListResponse),
        (status = 400, description = "Invalid date")
    ),
    tag = "Booking"
))]
pub async fn list_bookings_handler(
    State(state): State<Arc<BookingState>>,
    ApiQuery(query): ApiQuery<DateQuery>,
) -> Result<Json<BookingListResponse>, RuangbookError> {
    let date = parse_date_param(query.date.as_deref())?;
    let bookings = list_confirmed(state.store.as_ref(), date).await?;
    Ok(Json(BookingListResponse { date, bookings }))
}

#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/bookings/today",
    responses((status = 200, description = "Today's confirmed bookings", body = BookingListResponse)),
    tag = "Booking"
))]
pub async fn today_bookings_handler(
    State(state): State<Arc<BookingState>>,
) -> Result<Json<BookingListResponse>, RuangbookError> {
    let date = state.window.today(state.clock.now());
    let bookings = list_confirmed(state.store.as_ref(), Some(date)).await?;
    Ok(Json(BookingListResponse {
        date: Some(date),
        bookings,
    }))
}

#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/bookings/tomorrow",
    responses((status = 200, description = "Tomorrow's confirmed bookings", body = BookingListResponse)),
    tag = "Booking"
))]
pub async fn tomorrow_bookings_handler(
    State(state): State<Arc<BookingState>>,
) -> Result<Json<BookingListResponse>, RuangbookError> {
    let date = state.window.tomorrow(state.clock.now());
    let bookings = list_confirmed(state.store.as_ref(), Some(date)).await?;
    Ok(Json(BookingListResponse {
        date: Some(date),
        bookings,
    }))
}

#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/availability",
    params(AvailabilityQuery),
    responses(
        (status = 200, description = "Whether the window is free", body = AvailabilityResponse),
        (status = 400, description = "Invalid query")
    ),
    tag = "Booking"
))]
pub async fn availability_handler(
    State(state): State<Arc<BookingState>>,
    ApiQuery(query): ApiQuery<AvailabilityQuery>,
) -> Result<Json<AvailabilityResponse>, RuangbookError> {
    let available = check_availability(state.store.as_ref(), &query).await?;
    Ok(Json(AvailabilityResponse { available }))
}

#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/bookings",
    request_body = BookingRequest,
    responses(
        (status = 201, description = "Booking created", body = Booking),
        (status = 400, description = "Field validation failed"),
        (status = 409, description = "Room already booked for that time"),
        (status = 422, description = "Date not bookable right now")
    ),
    tag = "Booking"
))]
pub async fn create_booking_handler(
    State(state): State<Arc<BookingState>>,
    ApiJson(request): ApiJson<BookingRequest>,
) -> Result<(StatusCode, Json<Booking>), RuangbookError> {
    let now = state.clock.now();
    let booking = create_booking(state.store.as_ref(), &state.window, now, &request).await?;
    state.notifier.publish(ChangeKind::Created, &booking);
    Ok((StatusCode::CREATED, Json(booking)))
}

#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/schedule",
    params(DateQuery),
    responses(
        (status = 200, description = "Room by hour grid", body = Schedule),
        (status = 400, description = "Invalid date")
    ),
    tag = "Booking"
))]
pub async fn schedule_handler(
    State(state): State<Arc<BookingState>>,
    ApiQuery(query): ApiQuery<DateQuery>,
) -> Result<Json<Schedule>, RuangbookError> {
    let now = state.clock.now();
    let date = parse_date_param(query.date.as_deref())?.unwrap_or_else(|| state.window.today(now));
    let bookings = list_confirmed(state.store.as_ref(), Some(date)).await?;
    debug!(%date, count = bookings.len(), "Building schedule");
    Ok(Json(build_schedule(&bookings, date, now, &state.window)))
}

/// Server-sent events, one per created or cancelled booking.
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/bookings/events",
    responses((status = 200, description = "text/event-stream of BookingChange", content_type = "text/event-stream")),
    tag = "Booking"
))]
pub async fn booking_events_handler(
    State(state): State<Arc<BookingState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    info!(
        subscribers = state.notifier.subscriber_count() + 1,
        "Realtime subscriber connected"
    );
    let receiver = state.notifier.subscribe();

    let events = stream::unfold(receiver, |mut receiver| async move {
        loop {
            match receiver.recv().await {
                Ok(change) => match Event::default().event(change.kind.as_str()).json_data(&change) {
                    Ok(event) => return Some((Ok(event), receiver)),
                    Err(e) => warn!("Failed to encode booking change: {}", e),
                },
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Realtime subscriber lagged, skipping changes");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    });

    Sse::new(events).keep_alive(KeepAlive::default())
}
