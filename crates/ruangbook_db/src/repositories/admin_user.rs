//! Repository for dashboard accounts

use crate::error::DbError;
use ruangbook_common::models::{AdminUser, UserRole};

pub trait AdminUserRepository {
    fn init_schema(&self) -> impl std::future::Future<Output = Result<(), DbError>> + Send;

    /// Store a new account. Emails are unique; `None` means the email is taken.
    fn create_user(
        &self,
        email: &str,
        password_hash: &str,
        role: UserRole,
    ) -> impl std::future::Future<Output = Result<Option<AdminUser>, DbError>> + Send;

    /// Lookup is case-insensitive.
    fn find_by_email(
        &self,
        email: &str,
    ) -> impl std::future::Future<Output = Result<Option<AdminUser>, DbError>> + Send;
}
