//! Repository modules for database access

pub mod admin_user;
pub mod admin_user_sql;
pub mod booking;
pub mod booking_sql;

pub use admin_user::AdminUserRepository;
pub use admin_user_sql::SqlAdminUserRepository;
pub use booking::BookingRepository;
pub use booking_sql::SqlBookingRepository;
