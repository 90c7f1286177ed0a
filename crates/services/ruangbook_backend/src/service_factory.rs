// --- File: crates/services/ruangbook_backend/src/service_factory.rs ---
//! Store factory.
//!
//! Picks the storage backend from the configuration and hands the routes trait objects,
//! so the booking and admin crates never see which one is in use.
use ruangbook_admin::MemoryAdminUserStore;
use ruangbook_booking::MemoryBookingStore;
use ruangbook_common::services::{DynAdminUserStore, DynBookingStore};
use ruangbook_common::RuangbookError;
use ruangbook_config::AppConfig;
use std::sync::Arc;
use tracing::{info, warn};

#[cfg(feature = "database")]
pub use sql::{SqlAdminUserStore, SqlBookingStore};

#[cfg(feature = "database")]
mod sql {
    use chrono::{DateTime, Utc};
    use ruangbook_common::models::{AdminUser, Booking, BookingStatus, UserRole};
    use ruangbook_common::services::{
        AdminUserStore, BookingQuery, BookingRecord, BookingStore, BoxFuture, BoxedError,
        InsertOutcome, StatusUpdate,
    };
    use ruangbook_db::{
        AdminUserRepository, BookingRepository, SqlAdminUserRepository, SqlBookingRepository,
    };

    /// [`BookingStore`] backed by the SQL repository.
    pub struct SqlBookingStore {
        inner: SqlBookingRepository,
    }

    impl SqlBookingStore {
        pub fn new(inner: SqlBookingRepository) -> Self {
            Self { inner }
        }
    }

    impl BookingStore for SqlBookingStore {
        type Error = BoxedError;

        fn insert_if_free(
            &self,
            record: BookingRecord,
        ) -> BoxFuture<'_, InsertOutcome, Self::Error> {
            let inner = &self.inner;
            Box::pin(async move { inner.insert_if_free(record).await.map_err(BoxedError::new) })
        }

        fn find_by_id(&self, id: &str) -> BoxFuture<'_, Option<Booking>, Self::Error> {
            let id = id.to_string();
            let inner = &self.inner;
            Box::pin(async move { inner.find_by_id(&id).await.map_err(BoxedError::new) })
        }

        fn list(&self, query: BookingQuery) -> BoxFuture<'_, Vec<Booking>, Self::Error> {
            let inner = &self.inner;
            Box::pin(async move { inner.list(query).await.map_err(BoxedError::new) })
        }

        fn set_status(
            &self,
            id: &str,
            status: BookingStatus,
            updated_at: DateTime<Utc>,
        ) -> BoxFuture<'_, Option<StatusUpdate>, Self::Error> {
            let id = id.to_string();
            let inner = &self.inner;
            Box::pin(async move {
                inner
                    .set_status(&id, status, updated_at)
                    .await
                    .map_err(BoxedError::new)
            })
        }

        fn is_healthy(&self) -> BoxFuture<'_, bool, Self::Error> {
            let client = self.inner.client();
            Box::pin(async move { Ok(client.is_healthy().await) })
        }
    }

    /// [`AdminUserStore`] backed by the SQL repository.
    pub struct SqlAdminUserStore {
        inner: SqlAdminUserRepository,
    }

    impl SqlAdminUserStore {
        pub fn new(inner: SqlAdminUserRepository) -> Self {
            Self { inner }
        }
    }

    impl AdminUserStore for SqlAdminUserStore {
        type Error = BoxedError;

        fn create_user(
            &self,
            email: &str,
            password_hash: &str,
            role: UserRole,
        ) -> BoxFuture<'_, Option<AdminUser>, Self::Error> {
            let email = email.to_string();
            let password_hash = password_hash.to_string();
            let inner = &self.inner;
            Box::pin(async move {
                inner
                    .create_user(&email, &password_hash, role)
                    .await
                    .map_err(BoxedError::new)
            })
        }

        fn find_by_email(&self, email: &str) -> BoxFuture<'_, Option<AdminUser>, Self::Error> {
            let email = email.to_string();
            let inner = &self.inner;
            Box::pin(async move { inner.find_by_email(&email).await.map_err(BoxedError::new) })
        }
    }
}

/// The stores every route works against.
#[derive(Clone)]
pub struct StoreFactory {
    pub bookings: DynBookingStore,
    pub users: DynAdminUserStore,
}

impl StoreFactory {
    /// In-memory stores. Data is lost on restart.
    pub fn in_memory() -> Self {
        Self {
            bookings: Arc::new(MemoryBookingStore::new()),
            users: Arc::new(MemoryAdminUserStore::new()),
        }
    }

    /// SQL stores when `use_database` is set, in-memory stores otherwise.
    pub async fn new(config: &AppConfig) -> Result<Self, RuangbookError> {
        if !config.use_database {
            warn!("use_database is off, bookings are kept in memory only");
            return Ok(Self::in_memory());
        }
        Self::sql(config).await
    }

    #[cfg(feature = "database")]
    async fn sql(config: &AppConfig) -> Result<Self, RuangbookError> {
        use ruangbook_db::{
            AdminUserRepository, BookingRepository, DbClient, SqlAdminUserRepository,
            SqlBookingRepository,
        };

        info!("Connecting to the booking database...");
        let client = DbClient::new(config).await?;
        let bookings = SqlBookingRepository::new(client.clone());
        bookings.init_schema().await?;
        let users = SqlAdminUserRepository::new(client.clone());
        users.init_schema().await?;
        info!("Database ready at {}", client);

        Ok(Self {
            bookings: Arc::new(SqlBookingStore::new(bookings)),
            users: Arc::new(SqlAdminUserStore::new(users)),
        })
    }

    #[cfg(not(feature = "database"))]
    async fn sql(_config: &AppConfig) -> Result<Self, RuangbookError> {
        Err(RuangbookError::ConfigError(
            "use_database is set but the backend was built without the database feature"
                .to_string(),
        ))
    }
}
