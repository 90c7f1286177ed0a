pub mod auth;
#[cfg(test)]
mod auth_test;
pub mod dashboard;
#[cfg(test)]
mod dashboard_test;
pub mod doc;
pub mod export;
pub mod handlers;
pub mod routes;
pub mod store;

pub use auth::{AuthError, Session};
pub use handlers::AdminState;
pub use store::MemoryAdminUserStore;
