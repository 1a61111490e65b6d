//! Structured logging with tracing
//!
//! Installs the global subscriber: an `EnvFilter` (overridable through
//! `PDIARY_LOG`), a stdout layer in text or JSON, and optionally a daily
//! rolling file layer.

use crate::config::LoggingConfig;
use crate::constants::{DEFAULT_LOG_FILE_STEM, LOG_FILTER_ENV};
use crate::error_ext::ErrorContext;
use pdiary_domain::error::{Error, Result};
use std::path::Path;
use tracing::{Level, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

/// Initialize logging with the provided configuration
///
/// Returns the file writer guard when file output is enabled; dropping it
/// flushes and stops the background writer, so keep it alive for the
/// lifetime of the program. Fails if a global subscriber is already set.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let level = parse_log_level(&config.level)?;
    let filter = build_filter(level);

    let stdout_layer = if config.json_format {
        fmt::layer()
            .json()
            .with_target(true)
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_writer(std::io::stderr)
            .boxed()
    };

    let (file_layer, guard) = match &config.file_output {
        Some(file_path) => {
            let directory = file_path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let stem = file_path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or(DEFAULT_LOG_FILE_STEM);
            let appender = tracing_appender::rolling::daily(directory, stem);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .boxed();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    Registry::default()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    info!(level = %level, json = config.json_format, "Logging initialized");
    if let Some(path) = &config.file_output {
        info!(path = %path.display(), "Writing logs to file");
    }
    Ok(guard)
}

/// Filter from `PDIARY_LOG` when set and valid, otherwise `level`
pub fn build_filter(level: Level) -> EnvFilter {
    let fallback = || EnvFilter::new(level.as_str().to_ascii_lowercase());
    match std::env::var(LOG_FILTER_ENV) {
        Ok(directives) => EnvFilter::try_new(&directives).unwrap_or_else(|e| {
            eprintln!("Ignoring invalid {LOG_FILTER_ENV} ({e})");
            fallback()
        }),
        Err(_) => fallback(),
    }
}

/// Parse log level string to tracing Level
pub fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" | "warning" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(Error::configuration(format!(
            "Invalid log level: {level}. Use trace, debug, info, warn, or error"
        ))),
    }
}
