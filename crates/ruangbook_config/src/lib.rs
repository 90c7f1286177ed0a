use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use serde_json::Value;
use std::env;
use std::path::{Path, PathBuf};
use tracing::warn;

pub mod env_vars;
pub mod models;

pub use models::*;

use env_vars::{get_config_prefix, secret_path_to_env_var, CONFIG_SEPARATOR, SECRET_MARKER};

/// Loads the layered application configuration.
///
/// Sources, later ones winning: `config/default`, `config/{RUN_ENV}` (both optional, any
/// format the `config` crate understands), then `RUANGBOOK__*` environment variables.
/// The directory can be moved with `CONFIG_DIR`.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();
    let config_dir = env::var("CONFIG_DIR").unwrap_or_else(|_| "config".to_string());
    load_config_from(Path::new(&config_dir))
}

/// Same as [`load_config`] with an explicit configuration directory.
pub fn load_config_from(config_dir: &Path) -> Result<AppConfig, ConfigError> {
    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    let prefix = get_config_prefix();

    let default_path: PathBuf = config_dir.join("default");
    let env_path: PathBuf = config_dir.join(&run_env);

    let builder = Config::builder()
        .add_source(File::with_name(&default_path.to_string_lossy()).required(false))
        .add_source(File::with_name(&env_path.to_string_lossy()).required(false))
        .add_source(
            Environment::with_prefix(&prefix)
                .separator(CONFIG_SEPARATOR)
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("admin.bootstrap_admins"),
        );

    let raw_config: AppConfig = builder.build()?.try_deserialize()?;
    apply_env_overrides_from_marker(raw_config)
}

/// Recursively replaces all "secret_from_env" string values with environment variable values
fn inject_env_secrets(value: &mut Value) {
    fn walk(path: Vec<String>, obj: &mut Value) {
        match obj {
            Value::Object(map) => {
                for (k, v) in map.iter_mut() {
                    let mut new_path = path.clone();
                    new_path.push(k.to_string());
                    walk(new_path, v);
                }
            }
            Value::String(s) if s == SECRET_MARKER => {
                let env_key = secret_path_to_env_var(&path);
                match env::var(&env_key) {
                    Ok(env_val) => *obj = Value::String(env_val),
                    Err(_) => warn!("env var {} not found for {}", env_key, SECRET_MARKER),
                }
            }
            _ => {}
        }
    }

    walk(vec![], value);
}

/// Applies environment overrides based on "secret_from_env" markers in serialized config
pub fn apply_env_overrides_from_marker(config: AppConfig) -> Result<AppConfig, ConfigError> {
    let mut json = serde_json::to_value(&config)
        .map_err(|err| ConfigError::Message(format!("failed to serialize config: {err}")))?;
    inject_env_secrets(&mut json);
    serde_json::from_value(json)
        .map_err(|err| ConfigError::Message(format!("failed to rebuild config: {err}")))
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Loads the dotenv file into the process environment, once.
///
/// `DOTENV_OVERRIDE` or a first command line argument starting with `.env` select the
/// file, `.env` is the default. Returns the path that was used.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path_override = env::var("DOTENV_OVERRIDE").ok();
    let dotenv_path_arg = env::args().nth(1).filter(|s| s.starts_with(".env"));

    let dotenv_path = dotenv_path_override
        .or(dotenv_path_arg)
        .unwrap_or_else(|| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_any_source() {
        let config = load_config_from(Path::new("does-not-exist")).expect("config loads");
        assert_eq!(config.booking.cutoff_time, "15:30");
        assert_eq!(config.booking.same_day_closing_hour, 16);
        assert_eq!(config.booking.time_zone, "Asia/Jakarta");
        assert_eq!(config.admin.token_ttl_minutes, 480);
        assert!(!config.use_database);
    }

    #[test]
    fn secret_marker_is_resolved_from_environment() {
        env::set_var("ADMIN_JWT_SECRET", "from-the-env");
        let mut config = AppConfig::default();
        config.admin.jwt_secret = SECRET_MARKER.to_string();

        let resolved = apply_env_overrides_from_marker(config).expect("overrides apply");
        assert_eq!(resolved.admin.jwt_secret, "from-the-env");
    }

    #[test]
    fn missing_secret_keeps_marker() {
        let mut config = AppConfig::default();
        config.logging.directory = Some(SECRET_MARKER.to_string());

        let resolved = apply_env_overrides_from_marker(config).expect("overrides apply");
        assert_eq!(resolved.logging.directory.as_deref(), Some(SECRET_MARKER));
    }
}
