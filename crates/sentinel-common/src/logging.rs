//! Structured logging infrastructure for Sentinel.

use crate::error::{Result, SentinelError};
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// File name prefix for the rolling log file.
pub const LOG_FILE_PREFIX: &str = "sentinel.log";

/// Configuration for the logging system
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "sentinel_commands=debug")
    pub level: String,
    /// Directory for a daily-rolling log file, in addition to the console
    pub directory: Option<PathBuf>,
    /// Whether to colorize console output
    pub ansi: bool,
    /// Whether to include target module information
    pub include_targets: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
            ansi: true,
            include_targets: true,
        }
    }
}

impl LoggingConfig {
    /// Builds the env filter, falling back to `info` on an invalid directive.
    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_new(&self.level).unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

/// Initialize the tracing subscriber with the given configuration.
///
/// The returned guard flushes the file writer on drop and must be held for the
/// lifetime of the process.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let console = fmt::layer()
        .with_ansi(config.ansi)
        .with_target(config.include_targets);

    let (file_layer, guard) = match &config.directory {
        Some(directory) => {
            std::fs::create_dir_all(directory)?;
            let appender = tracing_appender::rolling::daily(directory, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_ansi(false)
                .with_target(config.include_targets)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(config.env_filter())
        .with(console)
        .with(file_layer)
        .try_init()
        .map_err(|e| SentinelError::Logging(e.to_string()))?;

    Ok(guard)
}
