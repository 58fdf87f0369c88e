//! `/channels`: list the guild's text channels.

use crate::discord::guild_id;
use crate::framework::{Context, Error};
use crate::platform::Platform;
use crate::reply::say_ephemeral;
use sentinel_common::{format_list_reply, GuildId};
use tracing::warn;

/// Lists text channel names in platform order.
pub async fn list_channels(platform: &dyn Platform, guild: GuildId) -> String {
    match platform.text_channels(guild).await {
        Ok(channels) => format_list_reply("Channels", channels.iter().map(|c| c.name.as_str())),
        Err(e) => {
            warn!(guild_id = %guild, error = %e, "Listing channels failed");
            format!("Failed to list channels: {}", e.user_message())
        }
    }
}

/// List all text channels in the server
#[poise::command(slash_command, guild_only)]
pub async fn channels(ctx: Context<'_>) -> Result<(), Error> {
    let Some(guild) = ctx.guild_id() else {
        return say_ephemeral(ctx, "This command only works in a server.").await;
    };
    let reply = list_channels(ctx.data().platform.as_ref(), guild_id(guild)).await;
    say_ephemeral(ctx, reply).await
}
