//! Configuration schema definitions.

use sentinel_common::{GuildId, SentinelError, UserId};
use std::fmt;
use std::path::PathBuf;

/// Main configuration structure for Sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Discord configuration.
    pub discord: DiscordConfig,
    /// Audit relay configuration.
    pub audit: AuditConfig,
    /// Logging configuration.
    pub logging: LoggingSettings,
}

/// Discord bot configuration.
#[derive(Clone, PartialEq, Eq)]
pub struct DiscordConfig {
    /// Discord bot token.
    pub token: String,
    /// The only guild the bot serves. Unset (`0`) disables the guild lock-down.
    pub guild_id: GuildId,
    /// The bot owner.
    pub owner_id: UserId,
}

// The token never reaches the logs.
impl fmt::Debug for DiscordConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiscordConfig")
            .field("token", &"<redacted>")
            .field("guild_id", &self.guild_id)
            .field("owner_id", &self.owner_id)
            .finish()
    }
}

/// Audit relay configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditConfig {
    /// Whether command usage is relayed to the audit channel.
    pub enabled: bool,
    /// Name of the text channel receiving command usage.
    pub channel_name: String,
    /// Skip the channel relay for invocations by the owner.
    pub exclude_owner: bool,
    /// Whether uncaught errors are relayed to the error channel.
    pub relay_errors: bool,
    /// Name of the text channel receiving error reports.
    pub error_channel_name: String,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingSettings {
    /// Tracing filter directive.
    pub level: String,
    /// Directory for the rolling log file.
    pub directory: Option<PathBuf>,
}

impl Config {
    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), SentinelError> {
        if self.discord.token.trim().is_empty() {
            return Err(SentinelError::MissingToken);
        }

        if self.audit.enabled && self.audit.channel_name.trim().is_empty() {
            return Err(SentinelError::Config(
                "Audit channel name cannot be empty while the audit relay is enabled".to_string(),
            ));
        }

        if self.audit.relay_errors && self.audit.error_channel_name.trim().is_empty() {
            return Err(SentinelError::Config(
                "Error channel name cannot be empty while error relay is enabled".to_string(),
            ));
        }

        Ok(())
    }

    /// Whether the guild lock-down (leave foreign guilds, guild-scoped commands) is active.
    #[must_use]
    pub const fn is_single_guild(&self) -> bool {
        !self.discord.guild_id.is_unset()
    }

    /// Whether `user` is the configured owner.
    #[must_use]
    pub fn is_owner(&self, user: UserId) -> bool {
        !self.discord.owner_id.is_unset() && self.discord.owner_id == user
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> Config {
        let mut config = Config::default();
        config.discord.token = "token".to_string();
        config
    }

    #[test]
    fn token_is_redacted_in_debug() {
        let config = valid();
        let rendered = format!("{:?}", config.discord);
        assert!(!rendered.contains("\"token\""));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn whitespace_token_is_missing() {
        let mut config = valid();
        config.discord.token = "   ".to_string();
        assert!(matches!(config.validate(), Err(SentinelError::MissingToken)));
    }

    #[test]
    fn empty_audit_channel_rejected_only_when_enabled() {
        let mut config = valid();
        config.audit.channel_name = String::new();
        assert!(config.validate().is_err());

        config.audit.enabled = false;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn owner_check_ignores_unset_owner() {
        let mut config = valid();
        assert!(!config.is_owner(UserId(0)));

        config.discord.owner_id = UserId(5);
        assert!(config.is_owner(UserId(5)));
        assert!(!config.is_owner(UserId(6)));
    }
}
