//! Main entry point for Sentinel.

use anyhow::Context;
use clap::Parser;
use sentinel_bot::{Args, SentinelBot};
use sentinel_common::logging::init_logging;
use sentinel_config::ConfigLoader;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match ConfigLoader::new(&args.secrets).load() {
        Ok(config) => config,
        Err(e) => {
            // Best effort, so the failure is at least visible on the console.
            let guard = init_logging(&args.fallback_logging_config()).ok().flatten();
            error!("Failed to load configuration: {}", e);
            drop(guard);
            std::process::exit(1);
        }
    };

    let _guard = init_logging(&args.logging_config(&config))
        .context("Failed to initialize logging")?;
    info!(
        secrets = %args.secrets.display(),
        guild_id = %config.discord.guild_id,
        "Starting Sentinel"
    );

    let bot = SentinelBot::new(config);
    if let Err(e) = bot.start().await {
        error!("Bot failed: {}", e);
        return Err(e.into());
    }

    Ok(())
}
