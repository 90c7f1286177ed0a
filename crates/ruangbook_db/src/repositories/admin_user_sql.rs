//! SQL implementation of the admin user repository

use crate::error::DbError;
use crate::repositories::admin_user::AdminUserRepository;
use crate::DbClient;
use chrono::{DateTime, SecondsFormat, Utc};
use ruangbook_common::models::{AdminUser, UserRole};
use sqlx::any::AnyRow;
use sqlx::Row;
use tracing::{debug, error, info};

#[derive(Debug, Clone)]
pub struct SqlAdminUserRepository {
    db_client: DbClient,
}

impl SqlAdminUserRepository {
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }
}

impl AdminUserRepository for SqlAdminUserRepository {
    async fn init_schema(&self) -> Result<(), DbError> {
        debug!("Initializing admin user schema");

        let query = r#"
            CREATE TABLE IF NOT EXISTS admin_users (
                id TEXT PRIMARY KEY,
                email TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                role TEXT NOT NULL DEFAULT 'user',
                created_at TEXT NOT NULL
            )
        "#;
        self.db_client.execute(query).await?;

        info!("Admin user schema initialized successfully");
        Ok(())
    }

    async fn create_user(
        &self,
        email: &str,
        password_hash: &str,
        role: UserRole,
    ) -> Result<Option<AdminUser>, DbError> {
        let email = email.trim().to_lowercase();
        debug!("Creating admin user: {}", email);

        let created_at = Utc::now();
        let user = AdminUser {
            id: uuid::Uuid::new_v4().to_string(),
            email,
            password_hash: password_hash.to_string(),
            role,
            created_at,
        };

        // ON CONFLICT keeps the existing account; zero rows affected means "taken".
        let query = r#"
            INSERT INTO admin_users (id, email, password_hash, role, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (email) DO NOTHING
        "#;
        let affected = sqlx::query(query)
            .bind(user.id.clone())
            .bind(user.email.clone())
            .bind(user.password_hash.clone())
            .bind(user.role.as_str())
            .bind(created_at.to_rfc3339_opts(SecondsFormat::Millis, true))
            .execute(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to insert admin user: {}", e);
                DbError::QueryError(e.to_string())
            })?
            .rows_affected();

        if affected == 0 {
            debug!("Admin user already exists: {}", user.email);
            return Ok(None);
        }
        info!(role = user.role.as_str(), "Admin user created");
        Ok(Some(user))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<AdminUser>, DbError> {
        let email = email.trim().to_lowercase();
        debug!("Finding admin user: {}", email);

        let query = r#"
            SELECT id, email, password_hash, role, created_at
            FROM admin_users
            WHERE email = $1
        "#;
        let row = sqlx::query(query)
            .bind(email)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to find admin user: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        row.as_ref().map(user_from_row).transpose()
    }
}

fn user_from_row(row: &AnyRow) -> Result<AdminUser, DbError> {
    let role: String = row.try_get("role")?;
    let created_at: String = row.try_get("created_at")?;
    Ok(AdminUser {
        id: row.try_get("id")?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        role: UserRole::parse(&role)
            .ok_or_else(|| DbError::DecodeError(format!("unknown role '{}'", role)))?,
        created_at: DateTime::parse_from_rfc3339(&created_at)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| DbError::DecodeError(format!("timestamp '{}': {}", created_at, e)))?,
    })
}
