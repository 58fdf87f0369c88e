//! `/ping`: report gateway latency.

use crate::framework::{Context, Error};
use crate::reply::say_ephemeral;
use sentinel_common::latency_millis;
use std::time::Duration;

/// Formats the latency reply.
pub fn latency_reply(latency: Duration) -> String {
    format!("Latency: {} ms", latency_millis(latency))
}

/// Check bot latency
#[poise::command(slash_command)]
pub async fn ping(ctx: Context<'_>) -> Result<(), Error> {
    let latency = ctx.ping().await;
    say_ephemeral(ctx, latency_reply(latency)).await
}
