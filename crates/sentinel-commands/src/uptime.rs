//! Uptime command accessing framework data through Poise's context.

use crate::framework::{Context, Error};
use crate::reply::say_ephemeral;
use sentinel_common::format_uptime;
use std::time::Duration;

/// Formats the uptime reply.
pub fn uptime_reply(elapsed: Duration) -> String {
    format!("⏱ Uptime: {}", format_uptime(elapsed))
}

/// Show how long the bot has been running
#[poise::command(slash_command)]
pub async fn uptime(ctx: Context<'_>) -> Result<(), Error> {
    let elapsed = ctx.data().start_time.elapsed();
    say_ephemeral(ctx, uptime_reply(elapsed)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reply_uses_hours_minutes_seconds() {
        assert_eq!(uptime_reply(Duration::from_secs(3725)), "⏱ Uptime: 1h 2m 5s");
    }
}
