//! Command line arguments.

use clap::Parser;
use sentinel_common::logging::LoggingConfig;
use sentinel_config::{Config, DEFAULT_SECRETS_FILE};
use std::path::PathBuf;

/// Sentinel command line.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Secrets file read before the process environment
    #[arg(short, long, default_value = DEFAULT_SECRETS_FILE)]
    pub secrets: PathBuf,

    /// Log filter, overrides LOG_LEVEL
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// Directory for the rolling log file, overrides LOG_DIR
    #[arg(long)]
    pub log_dir: Option<PathBuf>,
}

impl Args {
    /// Logging settings with command line values taking precedence over the config.
    #[must_use]
    pub fn logging_config(&self, config: &Config) -> LoggingConfig {
        LoggingConfig {
            level: self
                .log_level
                .clone()
                .unwrap_or_else(|| config.logging.level.clone()),
            directory: self
                .log_dir
                .clone()
                .or_else(|| config.logging.directory.clone()),
            ..LoggingConfig::default()
        }
    }

    /// Logging settings used when the config itself could not be loaded.
    #[must_use]
    pub fn fallback_logging_config(&self) -> LoggingConfig {
        self.logging_config(&Config::default())
    }
}
