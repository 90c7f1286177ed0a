//! Environment variable naming for the RuangBook configuration.
//!
//! Configuration values map to `RUANGBOOK__SECTION__KEY`, secrets referenced with the
//! `secret_from_env` marker map to `SECTION_KEY`.

use std::env;

/// The default prefix for configuration environment variables
pub const DEFAULT_PREFIX: &str = "RUANGBOOK";

/// The separator for configuration environment variables
pub const CONFIG_SEPARATOR: &str = "__";

/// The separator for secret environment variables
pub const SECRET_SEPARATOR: &str = "_";

/// Marker value that asks the loader to read the real value from the environment.
pub const SECRET_MARKER: &str = "secret_from_env";

/// Get the prefix for configuration environment variables
pub fn get_config_prefix() -> String {
    env::var("PREFIX").unwrap_or_else(|_| DEFAULT_PREFIX.to_string())
}

/// Convert a secret path (as segments) to an environment variable name
///
/// `["admin", "jwt_secret"]` becomes `ADMIN_JWT_SECRET`.
pub fn secret_path_to_env_var<S: AsRef<str>>(segments: &[S]) -> String {
    segments
        .iter()
        .map(|s| s.as_ref())
        .collect::<Vec<_>>()
        .join(SECRET_SEPARATOR)
        .to_uppercase()
}
