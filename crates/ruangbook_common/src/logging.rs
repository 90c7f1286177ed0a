//! Logging utilities for RuangBook.
//!
//! Every crate logs through `tracing`. The binary calls [`init_from_config`] once at
//! startup; tests and tools can use [`init`] or [`init_with_level`].

use ruangbook_config::LoggingConfig;
use tracing::{info, warn, Level};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    filter::{Directive, LevelFilter},
    fmt,
    prelude::*,
    EnvFilter,
};

/// Initialize the tracing subscriber at INFO.
///
/// ```
/// use ruangbook_common::logging;
///
/// logging::init();
/// logging::init_with_level(tracing::Level::DEBUG);
/// ```
pub fn init() {
    init_with_level(Level::INFO);
}

/// Initialize a console-only subscriber with a specific log level.
///
/// A second call is a no-op, a global subscriber may only be set once.
pub fn init_with_level(level: Level) {
    let filter = build_filter(&level.to_string().to_lowercase());

    let result = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_thread_ids(true)
                .with_thread_names(true),
        )
        .with(filter)
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
    }
}

/// Initialize logging from the `[logging]` section.
///
/// With `directory` set, a daily rolling `ruangbook.log` is written next to the console
/// output. The returned guard flushes that file on drop and must live as long as `main`.
pub fn init_from_config(config: &LoggingConfig) -> Option<WorkerGuard> {
    let filter = build_filter(&config.level);

    let (file_layer, guard) = match config.directory.as_deref() {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "ruangbook.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let result = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_line_number(true))
        .with(file_layer)
        .try_init();

    match result {
        Ok(()) => {
            info!(
                level = %config.level,
                directory = ?config.directory,
                "Logging initialized"
            );
            guard
        }
        Err(_) => None,
    }
}

// RUST_LOG wins for everything it names; our own crates get the configured level.
fn build_filter(level: &str) -> EnvFilter {
    let filter = EnvFilter::from_default_env();
    match format!("ruangbook={}", level).parse::<Directive>() {
        Ok(directive) => filter.add_directive(directive),
        Err(e) => {
            warn!("Invalid log level '{}': {}", level, e);
            filter.add_directive(Directive::from(LevelFilter::INFO))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_init_does_not_panic() {
        init();
        init_with_level(Level::DEBUG);
    }
}
