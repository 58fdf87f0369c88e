//! Best-effort audit relay for command usage and uncaught errors.
//!
//! Every invocation produces one structured log line. When enabled, a formatted
//! copy is sent to a fixed-name channel in the same guild. Relay failures are
//! logged and swallowed; nothing is retried and nothing reaches the caller.

use crate::platform::Platform;
use chrono::{DateTime, Utc};
use sentinel_common::{
    escape_mentions, format_timestamp, truncate_string, ChannelId, ErrorKind, GuildId, UserId,
    MESSAGE_LIMIT,
};
use sentinel_config::{AuditConfig, Config};
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

/// A completed command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    /// Correlates the log line with the relayed message.
    pub id: Uuid,
    /// Command name without the leading slash.
    pub command: String,
    /// Invoking user.
    pub user_id: UserId,
    /// Invoking user's name.
    pub user_name: String,
    /// Guild the command ran in, `None` in DMs.
    pub guild_id: Option<GuildId>,
    /// Channel the command ran in.
    pub channel_id: ChannelId,
    /// When the invocation completed.
    pub timestamp: DateTime<Utc>,
}

impl AuditEvent {
    /// Creates an event stamped with the current time.
    pub fn new(
        command: impl Into<String>,
        user_id: UserId,
        user_name: impl Into<String>,
        guild_id: Option<GuildId>,
        channel_id: ChannelId,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            command: command.into(),
            user_id,
            user_name: user_name.into(),
            guild_id,
            channel_id,
            timestamp: Utc::now(),
        }
    }

    /// The message relayed to the audit channel.
    #[must_use]
    pub fn render(&self) -> String {
        let line = format!(
            "`/{}` used by {} ({}) in {} at {}",
            self.command,
            self.user_name,
            self.user_id,
            self.channel_id.mention(),
            format_timestamp(self.timestamp)
        );
        truncate_string(&escape_mentions(&line), MESSAGE_LIMIT)
    }
}

/// What happened to a relay attempt. Production callers ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayOutcome {
    /// Sent to the channel.
    Delivered,
    /// Channel relay disabled or no guild to relay in; logged only.
    LoggedOnly,
    /// Owner invocation with owner exclusion on; logged only.
    Skipped,
    /// No text channel with the configured name.
    ChannelMissing,
    /// Channel lookup or send failed.
    Failed(ErrorKind),
}

/// Relays command usage and errors to fixed-name channels.
#[derive(Debug, Clone)]
pub struct AuditRelay {
    config: Arc<Config>,
}

impl AuditRelay {
    /// Creates a relay reading its settings and the owner from `config`.
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    /// Relay settings.
    #[must_use]
    pub fn config(&self) -> &AuditConfig {
        &self.config.audit
    }

    /// Logs a completed invocation and, if configured, relays it to the audit channel.
    pub async fn record(&self, platform: &dyn Platform, event: &AuditEvent) -> RelayOutcome {
        info!(
            audit_id = %event.id,
            command = %event.command,
            user_id = %event.user_id,
            user = %event.user_name,
            guild_id = ?event.guild_id.map(GuildId::get),
            channel_id = %event.channel_id,
            timestamp = %format_timestamp(event.timestamp),
            "Command invoked"
        );

        let audit = self.config();
        if !audit.enabled {
            return RelayOutcome::LoggedOnly;
        }
        if audit.exclude_owner && self.config.is_owner(event.user_id) {
            return RelayOutcome::Skipped;
        }
        let Some(guild) = event.guild_id else {
            return RelayOutcome::LoggedOnly;
        };

        deliver(platform, guild, &audit.channel_name, &event.render()).await
    }

    /// Logs an uncaught error and, if configured, relays it to the error channel.
    pub async fn report_error(
        &self,
        platform: &dyn Platform,
        guild: Option<GuildId>,
        origin: &str,
        detail: &str,
    ) -> RelayOutcome {
        error!(origin = %origin, error = %detail, "Unhandled error");

        let audit = self.config();
        if !audit.relay_errors {
            return RelayOutcome::LoggedOnly;
        }
        let Some(guild) = guild.filter(|g| !g.is_unset()) else {
            return RelayOutcome::LoggedOnly;
        };

        let content = truncate_string(
            &escape_mentions(&format!(
                "Error in {origin} at {}:\n```\n{detail}\n```",
                format_timestamp(Utc::now())
            )),
            MESSAGE_LIMIT,
        );
        deliver(platform, guild, &audit.error_channel_name, &content).await
    }
}

/// One lookup, at most one send, never an error.
async fn deliver(
    platform: &dyn Platform,
    guild: GuildId,
    channel_name: &str,
    content: &str,
) -> RelayOutcome {
    let channel = match platform.find_text_channel(guild, channel_name).await {
        Ok(Some(channel)) => channel,
        Ok(None) => {
            warn!(guild_id = %guild, channel = %channel_name, "Relay channel not found");
            return RelayOutcome::ChannelMissing;
        }
        Err(e) => {
            warn!(guild_id = %guild, channel = %channel_name, error = %e, "Relay channel lookup failed");
            return RelayOutcome::Failed(e.kind);
        }
    };

    match platform.send_message(channel, content).await {
        Ok(()) => RelayOutcome::Delivered,
        Err(e) => {
            warn!(channel_id = %channel, channel = %channel_name, error = %e, "Relay send failed");
            RelayOutcome::Failed(e.kind)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MockPlatform;
    use sentinel_common::test_utils::{discord_fixtures, LogCapture};
    use sentinel_common::PlatformError;

    fn relay_with_owner(audit: AuditConfig, owner: UserId) -> AuditRelay {
        let mut config = Config::default();
        config.audit = audit;
        config.discord.owner_id = owner;
        AuditRelay::new(Arc::new(config))
    }

    fn relay(audit: AuditConfig) -> AuditRelay {
        relay_with_owner(audit, discord_fixtures::test_user_id())
    }

    fn event(user: UserId) -> AuditEvent {
        AuditEvent::new(
            "clear",
            user,
            "alice",
            Some(discord_fixtures::test_guild_id()),
            discord_fixtures::test_channel_id(),
        )
    }

    #[tokio::test]
    async fn delivers_to_named_channel() {
        let mut platform = MockPlatform::new();
        platform
            .expect_find_text_channel()
            .withf(|_, name| name == "bot-logs")
            .times(1)
            .returning(|_, _| Ok(Some(ChannelId(77))));
        platform
            .expect_send_message()
            .withf(|channel, content| *channel == ChannelId(77) && content.contains("`/clear`"))
            .times(1)
            .returning(|_, _| Ok(()));

        let outcome = relay(AuditConfig::default())
            .record(&platform, &event(UserId(1)))
            .await;
        assert_eq!(outcome, RelayOutcome::Delivered);
    }

    #[tokio::test]
    async fn missing_channel_is_logged_not_raised() {
        let capture = LogCapture::default();
        let _guard = tracing::subscriber::set_default(capture.subscriber());

        let mut platform = MockPlatform::new();
        platform
            .expect_find_text_channel()
            .returning(|_, _| Ok(None));
        platform.expect_send_message().never();

        let outcome = relay(AuditConfig::default())
            .record(&platform, &event(UserId(1)))
            .await;

        assert_eq!(outcome, RelayOutcome::ChannelMissing);
        assert!(capture.contains("Relay channel not found"));
    }

    #[tokio::test]
    async fn failing_send_is_logged_not_raised() {
        let capture = LogCapture::default();
        let _guard = tracing::subscriber::set_default(capture.subscriber());

        let mut platform = MockPlatform::new();
        platform
            .expect_find_text_channel()
            .returning(|_, _| Ok(Some(ChannelId(77))));
        platform
            .expect_send_message()
            .times(1)
            .returning(|_, _| Err(PlatformError::permission_denied("Missing Permissions")));

        let outcome = relay(AuditConfig::default())
            .record(&platform, &event(UserId(1)))
            .await;

        assert_eq!(outcome, RelayOutcome::Failed(ErrorKind::PermissionDenied));
        assert!(capture.contains("Relay send failed"));
        assert!(capture.contains("Command invoked"));
    }

    #[tokio::test]
    async fn failing_lookup_is_logged_not_raised() {
        let capture = LogCapture::default();
        let _guard = tracing::subscriber::set_default(capture.subscriber());

        let mut platform = MockPlatform::new();
        platform
            .expect_find_text_channel()
            .returning(|_, _| Err(PlatformError::transport("timed out")));
        platform.expect_send_message().never();

        let outcome = relay(AuditConfig::default())
            .record(&platform, &event(UserId(1)))
            .await;

        assert_eq!(outcome, RelayOutcome::Failed(ErrorKind::Transport));
        assert!(capture.contains("Relay channel lookup failed"));
    }

    #[tokio::test]
    async fn owner_is_skipped_only_when_excluded() {
        let owner = discord_fixtures::test_user_id();

        let platform = MockPlatform::new();
        let config = AuditConfig {
            exclude_owner: true,
            ..AuditConfig::default()
        };
        assert_eq!(
            relay(config).record(&platform, &event(owner)).await,
            RelayOutcome::Skipped
        );

        let mut platform = MockPlatform::new();
        platform
            .expect_find_text_channel()
            .times(1)
            .returning(|_, _| Ok(Some(ChannelId(77))));
        platform
            .expect_send_message()
            .times(1)
            .returning(|_, _| Ok(()));
        assert_eq!(
            relay(AuditConfig::default())
                .record(&platform, &event(owner))
                .await,
            RelayOutcome::Delivered
        );
    }

    #[tokio::test]
    async fn exclusion_without_configured_owner_relays_everyone() {
        let mut platform = MockPlatform::new();
        platform
            .expect_find_text_channel()
            .times(1)
            .returning(|_, _| Ok(Some(ChannelId(77))));
        platform
            .expect_send_message()
            .times(1)
            .returning(|_, _| Ok(()));

        let config = AuditConfig {
            exclude_owner: true,
            ..AuditConfig::default()
        };
        let relay = relay_with_owner(config, UserId(0));
        assert_eq!(
            relay.record(&platform, &event(UserId(0))).await,
            RelayOutcome::Delivered
        );
    }

    #[tokio::test]
    async fn disabled_relay_only_logs() {
        let platform = MockPlatform::new();
        let config = AuditConfig {
            enabled: false,
            ..AuditConfig::default()
        };
        assert_eq!(
            relay(config).record(&platform, &event(UserId(1))).await,
            RelayOutcome::LoggedOnly
        );
    }

    #[tokio::test]
    async fn direct_messages_only_log() {
        let platform = MockPlatform::new();
        let mut dm = event(UserId(1));
        dm.guild_id = None;
        assert_eq!(
            relay(AuditConfig::default()).record(&platform, &dm).await,
            RelayOutcome::LoggedOnly
        );
    }

    #[tokio::test]
    async fn error_report_goes_to_error_channel_truncated() {
        let mut platform = MockPlatform::new();
        platform
            .expect_find_text_channel()
            .withf(|_, name| name == "bot-errors")
            .returning(|_, _| Ok(Some(ChannelId(88))));
        platform
            .expect_send_message()
            .withf(|_, content| content.chars().count() <= MESSAGE_LIMIT && content.contains("/purgeall"))
            .times(1)
            .returning(|_, _| Ok(()));

        let config = AuditConfig {
            error_channel_name: "bot-errors".to_string(),
            ..AuditConfig::default()
        };
        let detail = "x".repeat(5000);
        let outcome = relay(config)
            .report_error(
                &platform,
                Some(discord_fixtures::test_guild_id()),
                "/purgeall",
                &detail,
            )
            .await;
        assert_eq!(outcome, RelayOutcome::Delivered);
    }

    #[tokio::test]
    async fn error_report_without_guild_only_logs() {
        let capture = LogCapture::default();
        let _guard = tracing::subscriber::set_default(capture.subscriber());

        let platform = MockPlatform::new();
        let outcome = relay(AuditConfig::default())
            .report_error(&platform, None, "event handler", "boom")
            .await;

        assert_eq!(outcome, RelayOutcome::LoggedOnly);
        assert!(capture.contains("Unhandled error"));
    }

    #[test]
    fn render_contains_details_and_escapes_mentions() {
        let mut event = event(UserId(42));
        event.user_name = "@everyone".to_string();
        let rendered = event.render();

        assert!(rendered.contains("`/clear`"));
        assert!(rendered.contains("(42)"));
        assert!(rendered.contains(&discord_fixtures::test_channel_id().mention()));
        assert!(!rendered.contains("@everyone"));
    }
}
