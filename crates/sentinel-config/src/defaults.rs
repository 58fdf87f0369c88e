//! Default values for every configuration section.

use crate::schema::{AuditConfig, Config, DiscordConfig, LoggingSettings};
use sentinel_common::{GuildId, UserId};

/// Default name of the channel receiving command usage and error reports.
pub const DEFAULT_AUDIT_CHANNEL: &str = "bot-logs";

/// Default tracing filter.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Default path of the secrets file.
pub const DEFAULT_SECRETS_FILE: &str = "secrets.env";

impl Default for Config {
    fn default() -> Self {
        Self {
            discord: DiscordConfig::default(),
            audit: AuditConfig::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            guild_id: GuildId(0),
            owner_id: UserId(0),
        }
    }
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            channel_name: DEFAULT_AUDIT_CHANNEL.to_string(),
            exclude_owner: false,
            relay_errors: true,
            error_channel_name: DEFAULT_AUDIT_CHANNEL.to_string(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            directory: None,
        }
    }
}
