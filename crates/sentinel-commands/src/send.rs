//! `/send`: post a message to a channel on the invoker's behalf.

use crate::discord::channel_id;
use crate::framework::{Context, Error};
use crate::platform::Platform;
use crate::reply::say_ephemeral;
use poise::serenity_prelude as serenity;
use sentinel_common::ChannelId;
use tracing::warn;

/// Posts `message` to `channel` and returns the confirmation or error reply.
pub async fn send_to_channel(platform: &dyn Platform, channel: ChannelId, message: &str) -> String {
    match platform.send_message(channel, message).await {
        Ok(()) => format!("Message sent to {}", channel.mention()),
        Err(e) => {
            warn!(channel_id = %channel, error = %e, "Send failed");
            format!("Failed to send message: {}", e.user_message())
        }
    }
}

/// Send a message to a channel
#[poise::command(
    slash_command,
    guild_only,
    default_member_permissions = "MANAGE_MESSAGES"
)]
pub async fn send(
    ctx: Context<'_>,
    #[description = "Channel to post in"]
    #[channel_types("Text")]
    channel: serenity::GuildChannel,
    #[description = "Message to send"]
    #[max_length = 2000]
    message: String,
) -> Result<(), Error> {
    let reply = send_to_channel(ctx.data().platform.as_ref(), channel_id(channel.id), &message).await;
    say_ephemeral(ctx, reply).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MockPlatform;
    use sentinel_common::PlatformError;

    #[tokio::test]
    async fn confirms_with_channel_mention() {
        let mut platform = MockPlatform::new();
        platform
            .expect_send_message()
            .withf(|channel, content| *channel == ChannelId(5) && content == "hello")
            .times(1)
            .returning(|_, _| Ok(()));

        let reply = send_to_channel(&platform, ChannelId(5), "hello").await;
        assert_eq!(reply, "Message sent to <#5>");
    }

    #[tokio::test]
    async fn permission_error_becomes_user_message() {
        let mut platform = MockPlatform::new();
        platform
            .expect_send_message()
            .returning(|_, _| Err(PlatformError::permission_denied("50013 Missing Permissions")));

        let reply = send_to_channel(&platform, ChannelId(5), "hello").await;
        assert!(reply.starts_with("Failed to send message: "));
        assert!(reply.contains("permission"));
        assert!(!reply.contains("50013"));
    }
}
