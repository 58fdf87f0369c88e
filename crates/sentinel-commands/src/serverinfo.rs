//! `/serverinfo`: show the current guild's name, id, member count and icon.

use crate::discord::guild_id;
use crate::framework::{Context, Error};
use crate::reply::{embed_ephemeral, say_ephemeral, Colors};
use poise::serenity_prelude as serenity;
use sentinel_common::GuildSummary;

/// Builds the "Server Information" panel.
pub fn server_embed(summary: &GuildSummary) -> serenity::CreateEmbed {
    let embed = serenity::CreateEmbed::new()
        .title("Server Information")
        .colour(Colors::SERVER)
        .field("Name", &summary.name, true)
        .field("ID", summary.id.to_string(), true)
        .field("Member Count", summary.member_count.to_string(), true);

    match &summary.icon_url {
        Some(url) => embed.thumbnail(url),
        None => embed,
    }
}

/// Get information about this server
#[poise::command(slash_command, guild_only)]
pub async fn serverinfo(ctx: Context<'_>) -> Result<(), Error> {
    // The cache guard must be released before the reply is awaited.
    let summary = ctx.guild().map(|guild| GuildSummary {
        id: guild_id(guild.id),
        name: guild.name.clone(),
        member_count: guild.member_count,
        icon_url: guild.icon_url(),
    });

    match summary {
        Some(summary) => embed_ephemeral(ctx, server_embed(&summary)).await,
        None => say_ephemeral(ctx, "Server information is not available yet, try again shortly.").await,
    }
}
