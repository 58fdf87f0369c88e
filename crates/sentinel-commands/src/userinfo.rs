//! `/userinfo`: show a user's name, discriminator, id and avatar.

use crate::discord::user_id;
use crate::framework::{Context, Error};
use crate::reply::{embed_ephemeral, Colors};
use poise::serenity_prelude as serenity;
use sentinel_common::UserSummary;

/// Extracts the displayed fields from a serenity user.
pub fn summarize_user(user: &serenity::User) -> UserSummary {
    UserSummary {
        id: user_id(user.id),
        name: user.name.clone(),
        discriminator: user.discriminator.map(std::num::NonZeroU16::get),
        avatar_url: user.face(),
    }
}

/// Builds the "User Information" panel.
pub fn user_embed(summary: &UserSummary) -> serenity::CreateEmbed {
    serenity::CreateEmbed::new()
        .title("User Information")
        .colour(Colors::USER)
        .field("Username", &summary.name, true)
        .field("Discriminator", summary.discriminator_display(), true)
        .field("ID", summary.id.to_string(), false)
        .thumbnail(&summary.avatar_url)
}

/// Get information about a user
#[poise::command(slash_command)]
pub async fn userinfo(
    ctx: Context<'_>,
    #[description = "User to look up"] user: serenity::User,
) -> Result<(), Error> {
    let summary = summarize_user(&user);
    embed_ephemeral(ctx, user_embed(&summary)).await
}
