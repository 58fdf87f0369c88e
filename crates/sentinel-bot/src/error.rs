//! Errors that can stop the bot process.

use poise::serenity_prelude as serenity;
use sentinel_common::SentinelError;

/// Failure while starting or running the client.
#[derive(thiserror::Error, Debug)]
pub enum BotError {
    /// Configuration could not be loaded or logging could not start.
    #[error("Startup failed: {0}")]
    Config(#[from] SentinelError),

    /// The gateway client failed to build or stopped with an error.
    #[error("Discord client error: {0}")]
    Discord(#[from] serenity::Error),
}

/// Result alias for the bot crate.
pub type BotResult<T> = Result<T, BotError>;
