// --- File: crates/ruangbook_admin/src/store.rs ---
//! In-memory account store for runs without a database and for tests.

use chrono::Utc;
use ruangbook_common::models::{AdminUser, UserRole};
use ruangbook_common::services::{AdminUserStore, BoxFuture, BoxedError};
use std::sync::{Mutex, MutexGuard};
use thiserror::Error;
use uuid::Uuid;

use crate::auth::normalize_email;

#[derive(Debug, Error)]
#[error("account store lock poisoned")]
struct PoisonedStore;

#[derive(Debug, Default)]
pub struct MemoryAdminUserStore {
    users: Mutex<Vec<AdminUser>>,
}

impl MemoryAdminUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<AdminUser>>, BoxedError> {
        self.users.lock().map_err(|_| BoxedError::new(PoisonedStore))
    }
}

impl AdminUserStore for MemoryAdminUserStore {
    type Error = BoxedError;

    fn create_user(
        &self,
        email: &str,
        password_hash: &str,
        role: UserRole,
    ) -> BoxFuture<'_, Option<AdminUser>, Self::Error> {
        let email = normalize_email(email);
        let password_hash = password_hash.to_string();
        Box::pin(async move {
            let mut users = self.lock()?;
            if users.iter().any(|u| u.email == email) {
                return Ok(None);
            }
            let user = AdminUser {
                id: Uuid::new_v4().to_string(),
                email,
                password_hash,
                role,
                created_at: Utc::now(),
            };
            users.push(user.clone());
            Ok(Some(user))
        })
    }

    fn find_by_email(&self, email: &str) -> BoxFuture<'_, Option<AdminUser>, Self::Error> {
        let email = normalize_email(email);
        Box::pin(async move {
            let users = self.lock()?;
            Ok(users.iter().find(|u| u.email == email).cloned())
        })
    }
}
