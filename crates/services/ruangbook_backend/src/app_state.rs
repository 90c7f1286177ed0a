// --- File: crates/services/ruangbook_backend/src/app_state.rs ---
use ruangbook_admin::AdminState;
use ruangbook_booking::{BookingNotifier, BookingState};
use ruangbook_common::{Clock, RuangbookError};
use ruangbook_config::AppConfig;
use std::sync::Arc;

use crate::service_factory::StoreFactory;

/// Everything the routers share. Public and admin routes see the same stores and the
/// same notifier, so a cancellation from the dashboard reaches every open schedule.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub stores: StoreFactory,
    pub notifier: Arc<BookingNotifier>,
    pub booking: Arc<BookingState>,
    pub admin: Arc<AdminState>,
}

impl AppState {
    pub fn new(
        config: Arc<AppConfig>,
        stores: StoreFactory,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, RuangbookError> {
        let notifier = Arc::new(BookingNotifier::new());
        let booking = BookingState::new(
            config.clone(),
            stores.bookings.clone(),
            notifier.clone(),
            clock.clone(),
        )?;
        let admin = AdminState::new(
            config.clone(),
            stores.bookings.clone(),
            stores.users.clone(),
            notifier.clone(),
            clock,
        )?;

        Ok(Self {
            config,
            stores,
            notifier,
            booking: Arc::new(booking),
            admin: Arc::new(admin),
        })
    }
}
