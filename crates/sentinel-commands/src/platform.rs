//! The seam between command handlers and the Discord API.
//!
//! Handlers only ever talk to `dyn Platform`, so their behavior can be tested
//! against a mock while production wires in [`crate::discord::SerenityPlatform`].

use async_trait::async_trait;
use sentinel_common::{ChannelId, ChannelInfo, GuildId, PlatformError, RoleInfo};

/// Platform operations used by the commands, the audit relay and the event handler.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Platform: Send + Sync {
    /// Posts `content` to a channel.
    async fn send_message(&self, channel: ChannelId, content: &str) -> Result<(), PlatformError>;

    /// Deletes up to `limit` of the most recent messages, or every message when `None`.
    ///
    /// Returns the number of messages deleted.
    async fn purge(&self, channel: ChannelId, limit: Option<u64>) -> Result<u64, PlatformError>;

    /// All roles of a guild in platform order, default role included.
    async fn guild_roles(&self, guild: GuildId) -> Result<Vec<RoleInfo>, PlatformError>;

    /// Text channels of a guild in platform order.
    async fn text_channels(&self, guild: GuildId) -> Result<Vec<ChannelInfo>, PlatformError>;

    /// Finds a text channel by exact name.
    async fn find_text_channel(
        &self,
        guild: GuildId,
        name: &str,
    ) -> Result<Option<ChannelId>, PlatformError>;

    /// Removes the bot from a guild.
    async fn leave_guild(&self, guild: GuildId) -> Result<(), PlatformError>;
}
