//! Reply formatting and list filtering shared by the command handlers.

use crate::types::{ChannelInfo, RoleId, RoleInfo};
use chrono::{DateTime, Utc};
use std::time::Duration;

/// Maximum length of a Discord message body, in characters.
pub const MESSAGE_LIMIT: usize = 2000;

/// Messages older than this cannot be bulk-deleted and must go one by one.
pub const BULK_DELETE_MAX_AGE_SECS: i64 = 14 * 24 * 60 * 60;

/// Formats a timestamp for display.
#[must_use]
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Formats an elapsed duration as `"{h}h {m}m {s}s"`, rounded to the nearest second.
#[must_use]
pub fn format_uptime(elapsed: Duration) -> String {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let total = elapsed.as_secs_f64().round() as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    format!("{hours}h {minutes}m {seconds}s")
}

/// Rounds a latency to whole milliseconds.
#[must_use]
pub fn latency_millis(latency: Duration) -> u128 {
    (latency.as_micros() + 500) / 1000
}

/// Neutralizes mass mentions so relayed text can't ping a whole guild.
#[must_use]
pub fn escape_mentions(input: &str) -> String {
    input
        .replace("@everyone", "@\u{200b}everyone")
        .replace("@here", "@\u{200b}here")
}

/// Truncates a string to a maximum number of characters with ellipsis.
#[must_use]
pub fn truncate_string(input: &str, max_length: usize) -> String {
    if input.chars().count() <= max_length {
        input.to_string()
    } else {
        let kept: String = input.chars().take(max_length.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

/// Builds a `"{title}:\n"` header followed by one item per line, clipped to [`MESSAGE_LIMIT`].
#[must_use]
pub fn format_list_reply<I, S>(title: &str, items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let body = items
        .into_iter()
        .map(|item| item.as_ref().to_string())
        .collect::<Vec<_>>()
        .join("\n");
    truncate_string(&format!("{title}:\n{body}"), MESSAGE_LIMIT)
}

/// Names of every role except the default one, in the given order.
#[must_use]
pub fn role_names(roles: &[RoleInfo], everyone: RoleId) -> Vec<String> {
    roles
        .iter()
        .filter(|role| role.id != everyone)
        .map(|role| role.name.clone())
        .collect()
}

/// Orders roles the way the platform lists them: by position, ties broken by id.
pub fn sort_roles(roles: &mut [RoleInfo]) {
    roles.sort_by_key(|role| (role.position, role.id));
}

/// Orders channels the way the platform lists them: by position, ties broken by id.
pub fn sort_channels(channels: &mut [ChannelInfo]) {
    channels.sort_by_key(|channel| (channel.position, channel.id));
}

/// Whether a message created at `created_unix` may still be bulk-deleted at `now_unix`.
///
/// A minute of slack keeps requests near the boundary from being rejected.
#[must_use]
pub const fn is_bulk_deletable(created_unix: i64, now_unix: i64) -> bool {
    now_unix - created_unix < BULK_DELETE_MAX_AGE_SECS - 60
}
