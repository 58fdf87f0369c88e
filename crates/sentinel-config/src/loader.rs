//! Configuration loading from a secrets file and the process environment.

use crate::defaults::DEFAULT_SECRETS_FILE;
use crate::schema::Config;
use sentinel_common::{GuildId, Result, SentinelError, UserId};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Required bot token.
pub const BOT_TOKEN: &str = "BOT_TOKEN";
/// Guild the bot is locked to.
pub const GUILD_ID: &str = "GUILD_ID";
/// Owner user id.
pub const OWNER_ID: &str = "OWNER_ID";
/// Toggle for the command-usage relay.
pub const AUDIT_ENABLED: &str = "AUDIT_ENABLED";
/// Channel name for the command-usage relay.
pub const AUDIT_CHANNEL: &str = "AUDIT_CHANNEL";
/// Skip the relay for the owner's own invocations.
pub const AUDIT_EXCLUDE_OWNER: &str = "AUDIT_EXCLUDE_OWNER";
/// Toggle for the error relay.
pub const ERROR_RELAY_ENABLED: &str = "ERROR_RELAY_ENABLED";
/// Channel name for the error relay.
pub const ERROR_CHANNEL: &str = "ERROR_CHANNEL";
/// Tracing filter directive.
pub const LOG_LEVEL: &str = "LOG_LEVEL";
/// Directory for the rolling log file.
pub const LOG_DIR: &str = "LOG_DIR";

/// Loads configuration from a `KEY=value` secrets file layered under the process environment.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    path: PathBuf,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new(DEFAULT_SECRETS_FILE)
    }
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the secrets file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the secrets file into the environment, then reads the configuration from it.
    ///
    /// Variables already set in the environment win over the file. A missing
    /// file is not an error; a malformed one is.
    pub fn load(&self) -> Result<Config> {
        self.load_secrets_file()?;
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Applies the secrets file to the process environment.
    ///
    /// Returns `false` when there is no file at the path.
    pub fn load_secrets_file(&self) -> Result<bool> {
        match dotenvy::from_path(&self.path) {
            Ok(()) => {
                info!(path = %self.path.display(), "Loaded secrets file");
                Ok(true)
            }
            Err(e) if e.not_found() => {
                debug!(path = %self.path.display(), "No secrets file, using process environment");
                Ok(false)
            }
            Err(e) => Err(SentinelError::Config(format!(
                "Failed to read {}: {e}",
                self.path.display()
            ))),
        }
    }

    /// Builds and validates a configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let mut config = Config::default();

        config.discord.token = var(BOT_TOKEN).ok_or(SentinelError::MissingToken)?;
        config.discord.guild_id = GuildId(parse_id(GUILD_ID, var(GUILD_ID))?);
        config.discord.owner_id = UserId(parse_id(OWNER_ID, var(OWNER_ID))?);

        if let Some(enabled) = parse_flag(AUDIT_ENABLED, var(AUDIT_ENABLED))? {
            config.audit.enabled = enabled;
        }
        if let Some(name) = var(AUDIT_CHANNEL) {
            config.audit.channel_name = normalize_channel_name(&name);
        }
        if let Some(exclude) = parse_flag(AUDIT_EXCLUDE_OWNER, var(AUDIT_EXCLUDE_OWNER))? {
            config.audit.exclude_owner = exclude;
        }
        if let Some(relay) = parse_flag(ERROR_RELAY_ENABLED, var(ERROR_RELAY_ENABLED))? {
            config.audit.relay_errors = relay;
        }
        if let Some(name) = var(ERROR_CHANNEL) {
            config.audit.error_channel_name = normalize_channel_name(&name);
        }

        if let Some(level) = var(LOG_LEVEL) {
            config.logging.level = level;
        }
        config.logging.directory = var(LOG_DIR).map(PathBuf::from);

        config.validate()?;
        Ok(config)
    }
}

/// Parses an id variable, defaulting to `0` when absent.
pub fn parse_id(var: &str, value: Option<String>) -> Result<u64> {
    value.map_or(Ok(0), |value| {
        value.parse::<u64>().map_err(|_| SentinelError::InvalidId {
            var: var.to_string(),
            value,
        })
    })
}

/// Parses an optional boolean variable.
pub fn parse_flag(var: &str, value: Option<String>) -> Result<Option<bool>> {
    let Some(value) = value else {
        return Ok(None);
    };

    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(Some(true)),
        "0" | "false" | "no" | "off" => Ok(Some(false)),
        _ => Err(SentinelError::InvalidFlag {
            var: var.to_string(),
            value,
        }),
    }
}

/// Strips a leading `#` so `#bot-logs` and `bot-logs` name the same channel.
fn normalize_channel_name(name: &str) -> String {
    name.trim_start_matches('#').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn missing_token_fails_fast() {
        let result = ConfigLoader::from_lookup(lookup(&[(GUILD_ID, "1")]));
        assert!(matches!(result, Err(SentinelError::MissingToken)));
    }

    #[test]
    fn empty_token_counts_as_missing() {
        let result = ConfigLoader::from_lookup(lookup(&[(BOT_TOKEN, "  ")]));
        assert!(matches!(result, Err(SentinelError::MissingToken)));
    }

    #[test]
    fn ids_default_to_zero() {
        let config = ConfigLoader::from_lookup(lookup(&[(BOT_TOKEN, "t")])).unwrap();
        assert_eq!(config.discord.guild_id, GuildId(0));
        assert_eq!(config.discord.owner_id, UserId(0));
        assert!(!config.is_single_guild());
    }

    #[test]
    fn non_numeric_id_is_rejected() {
        let result = ConfigLoader::from_lookup(lookup(&[(BOT_TOKEN, "t"), (GUILD_ID, "abc")]));
        match result {
            Err(SentinelError::InvalidId { var, value }) => {
                assert_eq!(var, GUILD_ID);
                assert_eq!(value, "abc");
            }
            other => panic!("expected InvalidId, got {other:?}"),
        }
    }

    #[test]
    fn flags_parse_case_insensitively() {
        assert_eq!(parse_flag("X", Some("YES".into())).unwrap(), Some(true));
        assert_eq!(parse_flag("X", Some("Off".into())).unwrap(), Some(false));
        assert_eq!(parse_flag("X", None).unwrap(), None);
        assert!(parse_flag("X", Some("maybe".into())).is_err());
    }

    #[test]
    fn channel_names_lose_leading_hash() {
        let config = ConfigLoader::from_lookup(lookup(&[
            (BOT_TOKEN, "t"),
            (AUDIT_CHANNEL, "#mod-log"),
        ]))
        .unwrap();
        assert_eq!(config.audit.channel_name, "mod-log");
    }

    #[test]
    fn missing_secrets_file_is_tolerated() {
        let dir = tempfile::tempdir().unwrap();
        let loader = ConfigLoader::new(dir.path().join("absent.env"));
        assert!(!loader.load_secrets_file().unwrap());
    }

    #[test]
    fn unreadable_secrets_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        // A directory opens but cannot be read as a file.
        let loader = ConfigLoader::new(dir.path());
        let err = loader.load_secrets_file().unwrap_err();
        assert!(matches!(err, SentinelError::Config(_)));
        assert!(err.to_string().contains("Failed to read"));
    }
}
