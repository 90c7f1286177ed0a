// File: crates/ruangbook_admin/src/handlers.rs
use crate::auth::{
    login, register, verify_token, AccountResponse, AuthError, CredentialsRequest, LoginResponse,
    Session,
};
use crate::dashboard::{
    all_bookings, apply_filter, cancel_booking, compute_stats, list_bookings, BookingFilter,
    CancelResponse, DashboardList, DashboardStats, FilterQuery,
};
use crate::export::{file_name, to_csv, to_pdf};
use axum::{
    extract::{Path, Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Json, Response},
    Extension,
};
use ruangbook_booking::{BookingNotifier, BookingWindow, ChangeKind};
use ruangbook_booking::logic::BookingError;
use ruangbook_common::services::{DynAdminUserStore, DynBookingStore};
use ruangbook_common::{ApiJson, ApiQuery, Clock, RuangbookError};
use ruangbook_config::AppConfig;
use std::sync::Arc;
use tracing::{debug, info};

// Shared state of the admin routes
#[derive(Clone)]
pub struct AdminState {
    pub config: Arc<AppConfig>,
    pub bookings: DynBookingStore,
    pub users: DynAdminUserStore,
    pub notifier: Arc<BookingNotifier>,
    pub clock: Arc<dyn Clock>,
    pub window: BookingWindow,
}

impl AdminState {
    pub fn new(
        config: Arc<AppConfig>,
        bookings: DynBookingStore,
        users: DynAdminUserStore,
        notifier: Arc<BookingNotifier>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, BookingError> {
        let window = BookingWindow::from_config(&config.booking)?;
        Ok(Self {
            config,
            bookings,
            users,
            notifier,
            clock,
            window,
        })
    }
}

// --- Middleware ---

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

fn session_from(state: &AdminState, headers: &HeaderMap) -> Result<Session, AuthError> {
    let token = bearer_token(headers).ok_or(AuthError::MissingToken)?;
    verify_token(&state.config.admin, token, state.clock.now())
}

/// Lets any signed-in account through and exposes its [`Session`] to the handler.
pub async fn require_session(
    State(state): State<Arc<AdminState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, RuangbookError> {
    let session = session_from(&state, req.headers())?;
    req.extensions_mut().insert(session);
    Ok(next.run(req).await)
}

/// Like [`require_session`] but only for the admin role.
pub async fn require_admin(
    State(state): State<Arc<AdminState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, RuangbookError> {
    let session = session_from(&state, req.headers())?;
    if !session.is_admin() {
        info!(user_id = %session.user_id, "Non-admin account refused");
        return Err(AuthError::Forbidden.into());
    }
    req.extensions_mut().insert(session);
    Ok(next.run(req).await)
}

// --- Auth handlers ---

#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/admin/auth/register",
    request_body = CredentialsRequest,
    responses(
        (status = 201, description = "Account created", body = AccountResponse),
        (status = 400, description = "Invalid email or password"),
        (status = 409, description = "Email already registered")
    ),
    tag = "Admin"
))]
pub async fn register_handler(
    State(state): State<Arc<AdminState>>,
    ApiJson(request): ApiJson<CredentialsRequest>,
) -> Result<(StatusCode, Json<AccountResponse>), RuangbookError> {
    let user = register(state.users.as_ref(), &state.config.admin, &request).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/admin/auth/login",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Signed in", body = LoginResponse),
        (status = 401, description = "Wrong email or password")
    ),
    tag = "Admin"
))]
pub async fn login_handler(
    State(state): State<Arc<AdminState>>,
    ApiJson(request): ApiJson<CredentialsRequest>,
) -> Result<Json<LoginResponse>, RuangbookError> {
    let response = login(
        state.users.as_ref(),
        &state.config.admin,
        state.clock.now(),
        &request,
    )
    .await?;
    Ok(Json(response))
}

#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/admin/auth/me",
    responses(
        (status = 200, description = "Current session", body = Session),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer" = [])),
    tag = "Admin"
))]
pub async fn me_handler(Extension(session): Extension<Session>) -> Json<Session> {
    Json(session)
}

// --- Dashboard handlers ---

#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/admin/bookings",
    params(FilterQuery),
    responses(
        (status = 200, description = "Filtered bookings", body = DashboardList),
        (status = 400, description = "Unknown filter value"),
        (status = 401, description = "Not signed in"),
        (status = 403, description = "Not an admin")
    ),
    security(("bearer" = [])),
    tag = "Admin"
))]
pub async fn list_handler(
    State(state): State<Arc<AdminState>>,
    ApiQuery(query): ApiQuery<FilterQuery>,
) -> Result<Json<DashboardList>, RuangbookError> {
    let filter = BookingFilter::from_query(&query)?;
    Ok(Json(list_bookings(state.bookings.as_ref(), &filter).await?))
}

#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/admin/stats",
    responses(
        (status = 200, description = "Dashboard statistics", body = DashboardStats),
        (status = 401, description = "Not signed in"),
        (status = 403, description = "Not an admin")
    ),
    security(("bearer" = [])),
    tag = "Admin"
))]
pub async fn stats_handler(
    State(state): State<Arc<AdminState>>,
) -> Result<Json<DashboardStats>, RuangbookError> {
    let today = state.window.today(state.clock.now());
    let bookings = all_bookings(state.bookings.as_ref()).await?;
    Ok(Json(compute_stats(&bookings, today)))
}

#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    patch,
    path = "/admin/bookings/{id}/cancel",
    params(("id" = String, Path, description = "Booking id")),
    responses(
        (status = 200, description = "Booking cancelled", body = CancelResponse),
        (status = 404, description = "Unknown booking"),
        (status = 401, description = "Not signed in"),
        (status = 403, description = "Not an admin")
    ),
    security(("bearer" = [])),
    tag = "Admin"
))]
pub async fn cancel_handler(
    State(state): State<Arc<AdminState>>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
) -> Result<Json<CancelResponse>, RuangbookError> {
    let response = cancel_booking(state.bookings.as_ref(), &id, state.clock.now()).await?;
    if response.changed {
        info!(booking_id = %id, admin = %session.email, "Cancelled from dashboard");
        state
            .notifier
            .publish(ChangeKind::Cancelled, &response.booking);
    }
    Ok(Json(response))
}

async fn filtered_for_export(
    state: &AdminState,
    query: &FilterQuery,
) -> Result<DashboardList, RuangbookError> {
    let filter = BookingFilter::from_query(query)?;
    let bookings = all_bookings(state.bookings.as_ref()).await?;
    Ok(apply_filter(bookings, &filter))
}

fn attachment(content_type: &'static str, name: String, body: Vec<u8>) -> Response {
    let disposition = format!("attachment; filename=\"{}\"", name);
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response()
}

#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/admin/bookings/export.csv",
    params(FilterQuery),
    responses(
        (status = 200, description = "CSV of the filtered bookings", content_type = "text/csv"),
        (status = 401, description = "Not signed in"),
        (status = 403, description = "Not an admin")
    ),
    security(("bearer" = [])),
    tag = "Admin"
))]
pub async fn export_csv_handler(
    State(state): State<Arc<AdminState>>,
    ApiQuery(query): ApiQuery<FilterQuery>,
) -> Result<Response, RuangbookError> {
    let list = filtered_for_export(&state, &query).await?;
    let now = state.clock.now();
    let csv = to_csv(&list.bookings, state.window.time_zone());
    debug!(rows = list.bookings.len(), "Exporting CSV");
    Ok(attachment(
        "text/csv; charset=utf-8",
        file_name(state.window.today(now), "csv"),
        csv.into_bytes(),
    ))
}

#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/admin/bookings/export.pdf",
    params(FilterQuery),
    responses(
        (status = 200, description = "PDF of the filtered bookings", content_type = "application/pdf"),
        (status = 401, description = "Not signed in"),
        (status = 403, description = "Not an admin")
    ),
    security(("bearer" = [])),
    tag = "Admin"
))]
pub async fn export_pdf_handler(
    State(state): State<Arc<AdminState>>,
    ApiQuery(query): ApiQuery<FilterQuery>,
) -> Result<Response, RuangbookError> {
    let list = filtered_for_export(&state, &query).await?;
    let now = state.clock.now();
    let pdf = to_pdf(&list.bookings, state.window.time_zone(), now);
    debug!(rows = list.bookings.len(), bytes = pdf.len(), "Exporting PDF");
    Ok(attachment(
        "application/pdf",
        file_name(state.window.today(now), "pdf"),
        pdf,
    ))
}
