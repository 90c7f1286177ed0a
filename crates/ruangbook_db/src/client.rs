//! Database client
//!
//! A thin wrapper over an `sqlx::Any` pool so the repositories stay driver agnostic.

use crate::error::DbError;
use ruangbook_config::{AppConfig, DatabaseConfig};
use sqlx::pool::PoolOptions;
use sqlx::{Pool, Transaction};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, error, info};

/// Type alias for a database transaction
pub type DbTransaction<'a> = Transaction<'a, sqlx::Any>;

const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Pooled database handle shared by all repositories.
#[derive(Debug, Clone)]
pub struct DbClient {
    pool: Pool<sqlx::Any>,
}

impl DbClient {
    /// Create a client from the `[database]` section of the application config.
    ///
    /// # Errors
    ///
    /// * The database configuration is missing
    /// * The database URL is empty
    /// * The database connection fails
    pub async fn new(config: &AppConfig) -> Result<Self, DbError> {
        let db_config = config
            .database
            .as_ref()
            .ok_or_else(|| DbError::ConfigError("Database configuration is missing".to_string()))?;

        Self::from_config(db_config).await
    }

    pub async fn from_config(db_config: &DatabaseConfig) -> Result<Self, DbError> {
        if db_config.url.is_empty() {
            return Err(DbError::ConfigError("Database URL is empty".to_string()));
        }

        let max_connections = db_config.max_connections.unwrap_or(DEFAULT_MAX_CONNECTIONS);
        let pool = Self::create_pool(&db_config.url, max_connections).await?;
        Ok(Self { pool })
    }

    /// Create a client straight from a URL, e.g. `sqlite::memory:` in tests.
    pub async fn from_url(db_url: &str) -> Result<Self, DbError> {
        if db_url.is_empty() {
            return Err(DbError::UrlError("Database URL is empty".to_string()));
        }

        let pool = Self::create_pool(db_url, DEFAULT_MAX_CONNECTIONS).await?;
        Ok(Self { pool })
    }

    async fn create_pool(db_url: &str, max_connections: u32) -> Result<Pool<sqlx::Any>, DbError> {
        debug!("Creating database pool with URL: {}", db_url);

        sqlx::any::install_default_drivers();

        let in_memory = is_in_memory(db_url);

        // Every connection to an in-memory SQLite database opens its own empty database,
        // so those pools hold exactly one connection that is never recycled.
        let pool_options: PoolOptions<sqlx::Any> = if in_memory {
            PoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .acquire_timeout(Duration::from_secs(3))
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            PoolOptions::new()
                .max_connections(max_connections.max(1))
                .acquire_timeout(Duration::from_secs(3))
                .idle_timeout(Duration::from_secs(600))
        };

        if db_url.starts_with("sqlite:") && !in_memory {
            ensure_sqlite_file(db_url)?;
        }

        let options = sqlx::any::AnyConnectOptions::from_str(db_url)
            .map_err(|e| DbError::UrlError(e.to_string()))?;

        let pool = pool_options.connect_with(options).await.map_err(|e| {
            error!("Failed to create database pool: {}", e);
            DbError::PoolError(e.to_string())
        })?;

        info!(in_memory, "Database pool created successfully");
        Ok(pool)
    }

    pub fn pool(&self) -> &Pool<sqlx::Any> {
        &self.pool
    }

    /// Begin a transaction
    pub async fn begin(&self) -> Result<DbTransaction<'_>, DbError> {
        self.pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionError(e.to_string()))
    }

    /// Execute a statement that returns no rows; yields the number of rows affected.
    pub async fn execute(&self, query: &str) -> Result<u64, DbError> {
        sqlx::query(query)
            .execute(&self.pool)
            .await
            .map(|r| r.rows_affected())
            .map_err(|e| DbError::QueryError(e.to_string()))
    }

    pub async fn is_healthy(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

impl std::fmt::Display for DbClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DbClient")
    }
}

fn is_in_memory(db_url: &str) -> bool {
    db_url.contains(":memory:") || db_url.contains("mode=memory")
}

// The Any driver cannot set `create_if_missing`, so the file and its directory are
// created up front.
fn ensure_sqlite_file(db_url: &str) -> Result<(), DbError> {
    let without_scheme = db_url
        .strip_prefix("sqlite://")
        .or_else(|| db_url.strip_prefix("sqlite:"))
        .unwrap_or(db_url);
    let db_path = without_scheme.split('?').next().unwrap_or(without_scheme);
    if db_path.is_empty() {
        return Ok(());
    }

    let path = Path::new(db_path);
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            debug!("Creating directory for SQLite database: {:?}", dir);
            std::fs::create_dir_all(dir).map_err(|e| {
                error!("Failed to create directory for SQLite database: {}", e);
                DbError::PoolError(format!("Failed to create directory: {}", e))
            })?;
        }
    }

    if !path.exists() {
        debug!("Creating empty SQLite database file: {}", db_path);
        std::fs::File::create(path).map_err(|e| {
            error!("Failed to create SQLite database file: {}", e);
            DbError::PoolError(format!("Failed to create database file: {}", e))
        })?;
    }
    Ok(())
}
