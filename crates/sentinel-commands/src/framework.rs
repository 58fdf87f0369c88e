//! Poise framework setup, shared data and the framework-level hooks.

use crate::audit::{AuditEvent, AuditRelay};
use crate::discord::{channel_id, guild_id, user_id};
use crate::platform::Platform;
use crate::reply::say_ephemeral;
use sentinel_common::ErrorKind;
use sentinel_config::Config;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, warn};

/// Application data accessible in all commands.
pub struct Data {
    /// Application configuration.
    pub config: Arc<Config>,
    /// Discord operations used by the handlers.
    pub platform: Arc<dyn Platform>,
    /// Command usage and error relay.
    pub audit: AuditRelay,
    /// When the framework finished setting up.
    pub start_time: Instant,
}

impl Data {
    /// Builds the shared data, stamping the boot instant.
    pub fn new(config: Arc<Config>, platform: Arc<dyn Platform>) -> Self {
        let audit = AuditRelay::new(Arc::clone(&config));
        Self {
            config,
            platform,
            audit,
            start_time: Instant::now(),
        }
    }
}

impl std::fmt::Debug for Data {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Data")
            .field("config", &self.config)
            .field("platform", &"<dyn Platform>")
            .field("audit", &self.audit)
            .field("start_time", &self.start_time)
            .finish()
    }
}

/// Application error type for commands.
pub type Error = Box<dyn std::error::Error + Send + Sync>;

/// Command context type.
pub type Context<'a> = poise::Context<'a, Data, Error>;

/// Every slash command the bot registers.
pub fn commands() -> Vec<poise::Command<Data, Error>> {
    vec![
        crate::send::send(),
        crate::ping::ping(),
        crate::userinfo::userinfo(),
        crate::serverinfo::serverinfo(),
        crate::clear::clear(),
        crate::purge_all::purgeall(),
        crate::roles::roles(),
        crate::uptime::uptime(),
        crate::channels::channels(),
    ]
}

/// Creates a new Poise framework with the commands and hooks installed.
pub fn create_framework() -> poise::FrameworkBuilder<Data, Error> {
    poise::Framework::builder().options(poise::FrameworkOptions {
        commands: commands(),
        on_error: |error| Box::pin(on_error(error)),
        post_command: |ctx| Box::pin(record_invocation(ctx)),
        event_handler: |ctx, event, framework, data| {
            Box::pin(crate::events::handle_event(ctx, event, framework, data))
        },
        ..Default::default()
    })
}

/// Runs the audit relay for a command that completed without error.
async fn record_invocation(ctx: Context<'_>) {
    let author = ctx.author();
    let event = AuditEvent::new(
        ctx.command().qualified_name.clone(),
        user_id(author.id),
        author.name.clone(),
        ctx.guild_id().map(guild_id),
        channel_id(ctx.channel_id()),
    );

    let data = ctx.data();
    data.audit.record(data.platform.as_ref(), &event).await;
}

/// Global error handler for the framework.
async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!("Failed to start bot: {:?}", error);
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            let command = format!("/{}", ctx.command().qualified_name);
            error!(command = %command, error = %error, "Command failed");

            if let Err(e) = say_ephemeral(ctx, ErrorKind::Unknown.user_message()).await {
                warn!(command = %command, error = %e, "Could not report command failure to user");
            }

            let data = ctx.data();
            data.audit
                .report_error(
                    data.platform.as_ref(),
                    ctx.guild_id().map(guild_id),
                    &command,
                    &error.to_string(),
                )
                .await;
        }
        other => {
            if let Err(e) = poise::builtins::on_error(other).await {
                error!(error = %e, "Error while handling error");
            }
        }
    }
}
