use crate::handlers::{
    cancel_handler, export_csv_handler, export_pdf_handler, list_handler, login_handler,
    me_handler, register_handler, require_admin, require_session, stats_handler, AdminState,
};
use axum::{
    middleware,
    routing::{get, patch, post},
    Router,
};
use std::sync::Arc;

/// Admin routes, relative to `/api`. Only register and login are reachable without a token.
pub fn routes(state: Arc<AdminState>) -> Router {
    let public = Router::new()
        .route("/admin/auth/register", post(register_handler))
        .route("/admin/auth/login", post(login_handler));

    let session = Router::new()
        .route("/admin/auth/me", get(me_handler))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_session));

    let admin = Router::new()
        .route("/admin/bookings", get(list_handler))
        .route("/admin/bookings/export.csv", get(export_csv_handler))
        .route("/admin/bookings/export.pdf", get(export_pdf_handler))
        .route("/admin/bookings/{id}/cancel", patch(cancel_handler))
        .route("/admin/stats", get(stats_handler))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    public.merge(session).merge(admin).with_state(state)
}
