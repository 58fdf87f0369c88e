//! `/roles`: list the guild's roles.

use crate::discord::guild_id;
use crate::framework::{Context, Error};
use crate::platform::Platform;
use crate::reply::say_ephemeral;
use sentinel_common::{format_list_reply, role_names, GuildId};
use tracing::warn;

/// Lists every role except the default one, in platform order.
pub async fn list_roles(platform: &dyn Platform, guild: GuildId) -> String {
    match platform.guild_roles(guild).await {
        Ok(roles) => format_list_reply("Roles", role_names(&roles, guild.everyone_role())),
        Err(e) => {
            warn!(guild_id = %guild, error = %e, "Listing roles failed");
            format!("Failed to list roles: {}", e.user_message())
        }
    }
}

/// List all roles in the server
#[poise::command(slash_command, guild_only)]
pub async fn roles(ctx: Context<'_>) -> Result<(), Error> {
    let Some(guild) = ctx.guild_id() else {
        return say_ephemeral(ctx, "This command only works in a server.").await;
    };
    let reply = list_roles(ctx.data().platform.as_ref(), guild_id(guild)).await;
    say_ephemeral(ctx, reply).await
}
