//! Gateway event handling: startup confirmation and the single-guild lock-down.

use crate::discord::guild_id;
use crate::framework::{Data, Error};
use crate::platform::Platform;
use poise::serenity_prelude as serenity;
use sentinel_common::{GuildId, PlatformError};
use tracing::{debug, info, warn};

/// What the bot did after being added to a guild.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuildJoinOutcome {
    /// The configured guild; nothing to do.
    Accepted,
    /// A foreign guild; the bot left it.
    Left,
    /// No guild configured; every guild is accepted.
    Unrestricted,
}

/// Central event handler for Discord events.
///
/// Errors are logged and relayed here; they never propagate to the framework.
pub async fn handle_event(
    _ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    if let Err(e) = dispatch(event, data).await {
        let configured = data.config.discord.guild_id;
        data.audit
            .report_error(
                data.platform.as_ref(),
                Some(configured),
                &format!("event {}", event.snake_case_name()),
                &e.to_string(),
            )
            .await;
    }
    Ok(())
}

async fn dispatch(event: &serenity::FullEvent, data: &Data) -> Result<(), PlatformError> {
    match event {
        serenity::FullEvent::Ready { data_about_bot } => {
            info!(
                "Logged in as {} (ID: {})",
                data_about_bot.user.name, data_about_bot.user.id
            );
        }
        serenity::FullEvent::GuildCreate { guild, .. } => {
            debug!(guild_id = %guild.id, guild = %guild.name, "Guild available");
            on_guild_join(
                data.platform.as_ref(),
                data.config.discord.guild_id,
                guild_id(guild.id),
            )
            .await?;
        }
        _ => {}
    }
    Ok(())
}

/// Leaves `joined` unless it is the configured guild.
///
/// With no configured guild the lock-down is off and every guild is accepted.
pub async fn on_guild_join(
    platform: &dyn Platform,
    configured: GuildId,
    joined: GuildId,
) -> Result<GuildJoinOutcome, PlatformError> {
    if configured.is_unset() {
        warn!(guild_id = %joined, "GUILD_ID is not set, staying in guild");
        return Ok(GuildJoinOutcome::Unrestricted);
    }
    if joined == configured {
        return Ok(GuildJoinOutcome::Accepted);
    }

    info!(guild_id = %joined, configured = %configured, "Leaving unauthorized guild");
    platform.leave_guild(joined).await?;
    Ok(GuildJoinOutcome::Left)
}
