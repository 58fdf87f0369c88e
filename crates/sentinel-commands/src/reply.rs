//! Ephemeral reply helpers and embed colors.

use crate::framework::{Context, Error};
use poise::serenity_prelude as serenity;

/// Embed colors used by the info commands.
pub struct Colors;

impl Colors {
    /// User information panels.
    pub const USER: u32 = 0x0034_98DB;
    /// Server information panels.
    pub const SERVER: u32 = 0x002E_CC71;
}

/// Replies with text only the invoking user can see.
pub async fn say_ephemeral(ctx: Context<'_>, content: impl Into<String>) -> Result<(), Error> {
    ctx.send(
        poise::CreateReply::default()
            .content(content)
            .ephemeral(true),
    )
    .await?;
    Ok(())
}

/// Replies with an embed only the invoking user can see.
pub async fn embed_ephemeral(ctx: Context<'_>, embed: serenity::CreateEmbed) -> Result<(), Error> {
    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;
    Ok(())
}
