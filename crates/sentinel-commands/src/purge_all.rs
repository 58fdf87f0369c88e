//! `/purgeall`: delete every message in a channel.

use crate::discord::channel_id;
use crate::framework::{Context, Error};
use crate::platform::Platform;
use crate::reply::say_ephemeral;
use poise::serenity_prelude as serenity;
use sentinel_common::{ChannelId, ErrorKind, PlatformError};
use tracing::{info, warn};

/// Bounded limit retried once when an unbounded purge is rejected.
pub const PURGE_ALL_FALLBACK_LIMIT: u64 = 10_000;

/// Purges everything, retrying once with [`PURGE_ALL_FALLBACK_LIMIT`] if the platform
/// rejects the unbounded request.
///
/// Permission, transport and not-found errors are returned without a retry.
pub async fn purge_all_messages(
    platform: &dyn Platform,
    channel: ChannelId,
) -> Result<u64, PlatformError> {
    match platform.purge(channel, None).await {
        Err(e) if e.kind == ErrorKind::Unknown => {
            warn!(
                channel_id = %channel,
                error = %e,
                fallback = PURGE_ALL_FALLBACK_LIMIT,
                "Unbounded purge rejected, retrying with fallback limit"
            );
            platform.purge(channel, Some(PURGE_ALL_FALLBACK_LIMIT)).await
        }
        other => other,
    }
}

/// Formats the `/purgeall` reply.
pub fn purge_all_reply(channel: ChannelId, result: &Result<u64, PlatformError>) -> String {
    match result {
        Ok(deleted) => format!("Purged {deleted} messages from {}", channel.mention()),
        Err(e) => format!("Failed to purge: {}", e.user_message()),
    }
}

/// Delete ALL messages from a channel
#[poise::command(
    slash_command,
    guild_only,
    default_member_permissions = "MANAGE_MESSAGES"
)]
pub async fn purgeall(
    ctx: Context<'_>,
    #[description = "Channel to purge"]
    #[channel_types("Text")]
    channel: serenity::GuildChannel,
) -> Result<(), Error> {
    ctx.defer_ephemeral().await?;

    let channel = channel_id(channel.id);
    let result = purge_all_messages(ctx.data().platform.as_ref(), channel).await;
    match &result {
        Ok(deleted) => info!(channel_id = %channel, deleted, "Purged channel"),
        Err(e) => warn!(channel_id = %channel, error = %e, "Purge failed"),
    }

    say_ephemeral(ctx, purge_all_reply(channel, &result)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MockPlatform;
    use mockall::Sequence;
    use sentinel_common::test_utils::LogCapture;

    #[tokio::test]
    async fn unbounded_purge_succeeds_without_fallback() {
        let mut platform = MockPlatform::new();
        platform
            .expect_purge()
            .withf(|_, limit| limit.is_none())
            .times(1)
            .returning(|_, _| Ok(312));

        let result = purge_all_messages(&platform, ChannelId(3)).await;
        assert_eq!(purge_all_reply(ChannelId(3), &result), "Purged 312 messages from <#3>");
    }

    #[tokio::test]
    async fn rejected_unbounded_purge_falls_back_once() {
        let mut seq = Sequence::new();
        let mut platform = MockPlatform::new();
        platform
            .expect_purge()
            .withf(|_, limit| limit.is_none())
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Err(PlatformError::unknown("400 Bad Request: limit")));
        platform
            .expect_purge()
            .withf(|_, limit| *limit == Some(PURGE_ALL_FALLBACK_LIMIT))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(42));

        let result = purge_all_messages(&platform, ChannelId(3)).await;
        assert_eq!(result, Ok(42));
        assert_eq!(purge_all_reply(ChannelId(3), &result), "Purged 42 messages from <#3>");
    }

    #[tokio::test]
    async fn permission_error_is_not_retried() {
        let mut platform = MockPlatform::new();
        platform
            .expect_purge()
            .times(1)
            .returning(|_, _| Err(PlatformError::permission_denied("Missing Permissions")));

        let result = purge_all_messages(&platform, ChannelId(3)).await;
        assert_eq!(result.as_ref().unwrap_err().kind, ErrorKind::PermissionDenied);
        assert!(purge_all_reply(ChannelId(3), &result).starts_with("Failed to purge: "));
    }

    #[tokio::test]
    async fn partial_count_of_rejected_purge_is_logged() {
        let capture = LogCapture::default();
        let _guard = tracing::subscriber::set_default(capture.subscriber());

        let mut seq = Sequence::new();
        let mut platform = MockPlatform::new();
        platform
            .expect_purge()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Err(PlatformError::unknown("rejected").after_partial_purge(300)));
        platform
            .expect_purge()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(12));

        let result = purge_all_messages(&platform, ChannelId(3)).await;
        assert_eq!(result, Ok(12));
        assert!(capture.contains("after deleting 300 messages"));
    }

    #[tokio::test]
    async fn failed_fallback_is_reported() {
        let mut platform = MockPlatform::new();
        platform
            .expect_purge()
            .times(2)
            .returning(|_, _| Err(PlatformError::unknown("rejected")));

        let result = purge_all_messages(&platform, ChannelId(3)).await;
        assert!(result.is_err());
    }
}
