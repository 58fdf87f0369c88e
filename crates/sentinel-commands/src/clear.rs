//! `/clear`: delete a bounded number of recent messages.

use crate::discord::channel_id;
use crate::framework::{Context, Error};
use crate::platform::Platform;
use crate::reply::say_ephemeral;
use poise::serenity_prelude as serenity;
use sentinel_common::ChannelId;
use tracing::{info, warn};

/// Deletes up to `limit` recent messages and returns the reply.
pub async fn clear_messages(platform: &dyn Platform, channel: ChannelId, limit: u64) -> String {
    match platform.purge(channel, Some(limit)).await {
        Ok(deleted) => {
            info!(channel_id = %channel, limit, deleted, "Cleared messages");
            format!("Deleted {deleted} messages from {}", channel.mention())
        }
        Err(e) => {
            warn!(channel_id = %channel, limit, error = %e, "Clear failed");
            format!("Failed to delete messages: {}", e.user_message())
        }
    }
}

/// Delete a number of messages from a channel
#[poise::command(
    slash_command,
    guild_only,
    default_member_permissions = "MANAGE_MESSAGES"
)]
pub async fn clear(
    ctx: Context<'_>,
    #[description = "Channel to clear"]
    #[channel_types("Text")]
    channel: serenity::GuildChannel,
    #[description = "How many recent messages to delete"]
    #[min = 1]
    limit: u32,
) -> Result<(), Error> {
    ctx.defer_ephemeral().await?;
    let reply = clear_messages(
        ctx.data().platform.as_ref(),
        channel_id(channel.id),
        u64::from(limit),
    )
    .await;
    say_ephemeral(ctx, reply).await
}
