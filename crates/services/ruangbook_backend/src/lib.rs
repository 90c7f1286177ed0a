pub mod app_state;
pub mod service_factory;

use app_state::AppState;
use axum::{routing::get, Router};
use ruangbook_admin::routes as admin_routes;
use ruangbook_booking::routes as booking_routes;

/// All API routes, nested under `/api`.
pub fn api_router(state: &AppState) -> Router {
    let api = Router::new()
        .route("/", get(|| async { "Welcome to the RuangBook API!" }))
        .merge(booking_routes::routes(state.booking.clone()))
        .merge(admin_routes::routes(state.admin.clone()));
    Router::new().nest("/api", api)
}
