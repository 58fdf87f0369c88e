//! Serenity-backed implementation of [`Platform`] and conversions at the SDK boundary.

use crate::platform::Platform;
use async_trait::async_trait;
use chrono::Utc;
use sentinel_common::{
    plan_deletes, sort_channels, sort_roles, ChannelId, ChannelInfo, DeletePlan, ErrorKind,
    GuildId, PageCursor, PlatformError, RoleId, RoleInfo, UserId,
};
use serenity::all::{ChannelType, GetMessages, Http, MessageId};
use serenity::http::HttpError;
use serenity::model::ModelError;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Talks to Discord through serenity's HTTP client.
#[derive(Clone)]
pub struct SerenityPlatform {
    http: Arc<Http>,
}

impl std::fmt::Debug for SerenityPlatform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerenityPlatform")
            .field("http", &"<serenity::Http>")
            .finish()
    }
}

impl SerenityPlatform {
    /// Wraps the client's HTTP handle.
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }

    /// Deletes one page worth of messages, bulk where allowed.
    async fn delete_page(
        &self,
        channel: serenity::all::ChannelId,
        plan: &DeletePlan<MessageId>,
    ) -> Result<(), PlatformError> {
        if let Some(id) = plan.single {
            channel
                .delete_message(&self.http, id)
                .await
                .map_err(map_error)?;
        }
        if !plan.bulk.is_empty() {
            channel
                .delete_messages(&self.http, plan.bulk.iter().copied())
                .await
                .map_err(map_error)?;
        }
        for id in &plan.stale {
            channel
                .delete_message(&self.http, *id)
                .await
                .map_err(map_error)?;
        }
        Ok(())
    }

    /// Fetches and deletes pages until the cursor is done, counting into `deleted`.
    async fn purge_pages(
        &self,
        channel: serenity::all::ChannelId,
        cursor: &mut PageCursor,
        deleted: &mut u64,
    ) -> Result<(), PlatformError> {
        let mut before: Option<MessageId> = None;

        while let Some(page) = cursor.next_page() {
            let mut request = GetMessages::new().limit(u8::try_from(page).unwrap_or(u8::MAX));
            if let Some(id) = before {
                request = request.before(id);
            }

            let messages = channel
                .messages(&self.http, request)
                .await
                .map_err(map_error)?;
            if let Some(oldest) = messages.last() {
                before = Some(oldest.id);
            }

            let batch: Vec<(MessageId, i64)> = messages
                .iter()
                .map(|message| (message.id, message.timestamp.unix_timestamp()))
                .collect();
            let plan = plan_deletes(&batch, Utc::now().timestamp());
            self.delete_page(channel, &plan).await?;

            let fetched = batch.len() as u64;
            *deleted += fetched;
            cursor.record(page, fetched);
            debug!(channel_id = %channel, fetched, deleted = *deleted, "Purged page");
        }

        Ok(())
    }
}

#[async_trait]
impl Platform for SerenityPlatform {
    #[instrument(skip(self, content), level = "debug")]
    async fn send_message(&self, channel: ChannelId, content: &str) -> Result<(), PlatformError> {
        to_channel(channel)?
            .say(&self.http, content)
            .await
            .map(|_| ())
            .map_err(map_error)
    }

    #[instrument(skip(self), level = "debug")]
    async fn purge(&self, channel: ChannelId, limit: Option<u64>) -> Result<u64, PlatformError> {
        let target = to_channel(channel)?;
        let mut cursor = PageCursor::new(limit);
        let mut deleted = 0u64;

        match self.purge_pages(target, &mut cursor, &mut deleted).await {
            Ok(()) => Ok(deleted),
            Err(e) => {
                warn!(channel_id = %channel, deleted, error = %e, "Purge stopped partway");
                Err(e.after_partial_purge(deleted))
            }
        }
    }

    async fn guild_roles(&self, guild: GuildId) -> Result<Vec<RoleInfo>, PlatformError> {
        let roles = to_guild(guild)?
            .roles(&self.http)
            .await
            .map_err(map_error)?;

        let mut roles: Vec<RoleInfo> = roles
            .values()
            .map(|role| RoleInfo {
                id: RoleId(role.id.get()),
                name: role.name.clone(),
                position: role.position,
            })
            .collect();
        sort_roles(&mut roles);
        Ok(roles)
    }

    async fn text_channels(&self, guild: GuildId) -> Result<Vec<ChannelInfo>, PlatformError> {
        let channels = to_guild(guild)?
            .channels(&self.http)
            .await
            .map_err(map_error)?;

        let mut channels: Vec<ChannelInfo> = channels
            .values()
            .filter(|channel| channel.kind == ChannelType::Text)
            .map(|channel| ChannelInfo {
                id: ChannelId(channel.id.get()),
                name: channel.name.clone(),
                position: channel.position,
            })
            .collect();
        sort_channels(&mut channels);
        Ok(channels)
    }

    async fn find_text_channel(
        &self,
        guild: GuildId,
        name: &str,
    ) -> Result<Option<ChannelId>, PlatformError> {
        Ok(self
            .text_channels(guild)
            .await?
            .into_iter()
            .find(|channel| channel.name == name)
            .map(|channel| channel.id))
    }

    #[instrument(skip(self), level = "debug")]
    async fn leave_guild(&self, guild: GuildId) -> Result<(), PlatformError> {
        to_guild(guild)?.leave(&self.http).await.map_err(map_error)
    }
}

/// Converts a serenity channel id.
pub fn channel_id(id: serenity::all::ChannelId) -> ChannelId {
    ChannelId(id.get())
}

/// Converts a serenity guild id.
pub fn guild_id(id: serenity::all::GuildId) -> GuildId {
    GuildId(id.get())
}

/// Converts a serenity user id.
pub fn user_id(id: serenity::all::UserId) -> UserId {
    UserId(id.get())
}

/// Converts to a serenity channel id, rejecting the unset id.
pub fn to_channel(id: ChannelId) -> Result<serenity::all::ChannelId, PlatformError> {
    if id.is_unset() {
        return Err(PlatformError::not_found("channel id is unset"));
    }
    Ok(serenity::all::ChannelId::new(id.get()))
}

/// Converts to a serenity guild id, rejecting the unset id.
pub fn to_guild(id: GuildId) -> Result<serenity::all::GuildId, PlatformError> {
    if id.is_unset() {
        return Err(PlatformError::not_found("guild id is unset"));
    }
    Ok(serenity::all::GuildId::new(id.get()))
}

/// Maps a serenity error onto the closed [`ErrorKind`] set, keeping the detail for logs.
pub fn map_error(error: serenity::Error) -> PlatformError {
    PlatformError::new(classify(&error), error.to_string())
}

/// Classifies a serenity error.
pub fn classify(error: &serenity::Error) -> ErrorKind {
    match error {
        serenity::Error::Http(http) => classify_http(http),
        serenity::Error::Model(model) => classify_model(model),
        serenity::Error::Gateway(_) | serenity::Error::Io(_) => ErrorKind::Transport,
        _ => ErrorKind::Unknown,
    }
}

fn classify_http(error: &HttpError) -> ErrorKind {
    match error {
        HttpError::UnsuccessfulRequest(response) => classify_status(response.status_code.as_u16()),
        HttpError::Request(_) => ErrorKind::Transport,
        _ => ErrorKind::Unknown,
    }
}

fn classify_model(error: &ModelError) -> ErrorKind {
    match error {
        ModelError::InvalidPermissions { .. } => ErrorKind::PermissionDenied,
        _ => ErrorKind::Unknown,
    }
}

/// Classifies an HTTP status returned by the Discord API.
#[must_use]
pub const fn classify_status(status: u16) -> ErrorKind {
    match status {
        401 | 403 => ErrorKind::PermissionDenied,
        404 => ErrorKind::NotFound,
        500..=599 => ErrorKind::Transport,
        _ => ErrorKind::Unknown,
    }
}
