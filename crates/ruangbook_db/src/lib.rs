//! SQL persistence for RuangBook
//!
//! A database client over `sqlx::Any` plus the booking and admin-user repositories.
//! SQLite is the default backend; the schema is created on startup.
//!
//! # Example
//!
//! ```rust,no_run
//! use ruangbook_db::{BookingRepository, DbClient, SqlBookingRepository};
//!
//! async fn setup_db() -> Result<SqlBookingRepository, Box<dyn std::error::Error>> {
//!     let client = DbClient::from_url("sqlite://data/ruangbook.db").await?;
//!     let bookings = SqlBookingRepository::new(client);
//!     bookings.init_schema().await?;
//!     Ok(bookings)
//! }
//! ```

pub mod client;
pub mod error;
pub mod repositories;

pub use client::DbClient;
pub use error::DbError;

pub use repositories::{
    AdminUserRepository, BookingRepository, SqlAdminUserRepository, SqlBookingRepository,
};
