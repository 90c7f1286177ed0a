// --- File: crates/ruangbook_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

// --- Database Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    pub url: String, // e.g. sqlite://data/ruangbook.db, via RUANGBOOK__DATABASE__URL
    #[serde(default)]
    pub max_connections: Option<u32>,
}

// --- Booking Rules Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BookingConfig {
    /// IANA zone the office runs in. All "today"/"tomorrow" decisions use it.
    #[serde(default = "default_time_zone")]
    pub time_zone: String,
    /// Local time (HH:MM) from which next-day bookings are accepted.
    #[serde(default = "default_cutoff_time")]
    pub cutoff_time: String,
    /// Same-day bookings stop being accepted from this local hour on.
    #[serde(default = "default_closing_hour")]
    pub same_day_closing_hour: u32,
}

fn default_time_zone() -> String {
    "Asia/Jakarta".to_string()
}

fn default_cutoff_time() -> String {
    "15:30".to_string()
}

fn default_closing_hour() -> u32 {
    16
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            time_zone: default_time_zone(),
            cutoff_time: default_cutoff_time(),
            same_day_closing_hour: default_closing_hour(),
        }
    }
}

// --- Admin Config ---
// The JWT secret is usually set to "secret_from_env" and resolved from ADMIN_JWT_SECRET.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AdminConfig {
    #[serde(default)]
    pub jwt_secret: String,
    #[serde(default = "default_token_ttl")]
    pub token_ttl_minutes: i64,
    /// Accounts registered with one of these emails receive the admin role.
    #[serde(default)]
    pub bootstrap_admins: Vec<String>,
}

fn default_token_ttl() -> i64 {
    8 * 60
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_ttl_minutes: default_token_ttl(),
            bootstrap_admins: Vec::new(),
        }
    }
}

// --- Logging Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// When set, logs are also written to a daily rolling file in this directory.
    #[serde(default)]
    pub directory: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: None,
        }
    }
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    // --- Runtime Flags (optional in config file, default to false) ---
    #[serde(default)]
    pub use_database: bool,

    // --- Optional Feature Configurations ---
    #[serde(default)]
    pub database: Option<DatabaseConfig>,
    #[serde(default)]
    pub booking: BookingConfig,
    #[serde(default)]
    pub admin: AdminConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Directory with the built front end, served as fallback when present.
    #[serde(default)]
    pub static_dir: Option<String>,
}
