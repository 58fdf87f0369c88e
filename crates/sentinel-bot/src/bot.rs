//! Client construction and lifecycle.

use crate::error::BotResult;
use poise::serenity_prelude as serenity;
use sentinel_commands::discord::{to_guild, SerenityPlatform};
use sentinel_commands::{create_framework, Data};
use sentinel_config::Config;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Main bot structure.
#[derive(Debug)]
pub struct SentinelBot {
    config: Arc<Config>,
}

impl SentinelBot {
    /// Creates a new bot instance.
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// The configuration the bot runs with.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Connects to Discord and runs until shutdown.
    pub async fn start(&self) -> BotResult<()> {
        let setup_config = self.config.clone();

        let framework = create_framework()
            .setup(move |ctx, _ready, framework| {
                let config = setup_config.clone();
                Box::pin(async move {
                    let commands = &framework.options().commands;
                    if config.is_single_guild() {
                        let guild = to_guild(config.discord.guild_id)?;
                        poise::builtins::register_in_guild(ctx, commands, guild).await?;
                        info!("Synced commands to guild {}", guild);
                    } else {
                        poise::builtins::register_globally(ctx, commands).await?;
                        warn!("GUILD_ID is not set, commands registered globally");
                    }

                    let platform = Arc::new(SerenityPlatform::new(ctx.http.clone()));
                    Ok(Data::new(config, platform))
                })
            })
            .build();

        let mut client = serenity::ClientBuilder::new(
            &self.config.discord.token,
            serenity::GatewayIntents::non_privileged(),
        )
        .framework(framework)
        .await?;

        let shard_manager = client.shard_manager.clone();
        tokio::spawn(async move {
            shutdown_signal().await;
            info!("Received shutdown signal, starting graceful shutdown");
            shard_manager.shutdown_all().await;
        });

        info!("Sentinel is starting up...");
        client.start().await?;
        info!("Bot has shut down cleanly");
        Ok(())
    }
}

/// Waits for Ctrl+C or, on unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {:?}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {:?}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
