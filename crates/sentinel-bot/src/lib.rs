//! # Sentinel Bot
//!
//! Single-guild Discord moderation and utility bot.
//!
//! This is the main binary crate: it parses the command line, resolves logging
//! settings and runs the Poise client until a shutdown signal arrives.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod bot;
pub mod cli;
pub mod error;

pub use bot::*;
pub use cli::*;
pub use error::*;
