// --- File: crates/ruangbook_booking/src/lib.rs ---
pub mod doc;
pub mod handlers;
pub mod logic;
#[cfg(test)]
mod logic_proptest;
pub mod notify;
pub mod routes;
pub mod schedule;
#[cfg(test)]
mod schedule_test;
pub mod store;
pub mod window;
#[cfg(test)]
mod window_test;

pub use handlers::BookingState;
pub use notify::{BookingChange, BookingNotifier, ChangeKind};
pub use store::MemoryBookingStore;
pub use window::BookingWindow;
