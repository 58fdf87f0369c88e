//! # Sentinel Commands
//!
//! Discord slash commands for the Sentinel moderation bot, built on Poise.
//!
//! Command handlers talk to Discord through the [`platform::Platform`] trait so
//! their replies can be tested without a gateway connection. The crate also owns
//! the audit relay and the gateway event handler that enforces the single-guild
//! lock-down.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod audit;
pub mod channels;
pub mod clear;
pub mod discord;
pub mod events;
pub mod framework;
pub mod ping;
pub mod platform;
pub mod purge_all;
pub mod reply;
pub mod roles;
pub mod send;
pub mod serverinfo;
pub mod uptime;
pub mod userinfo;

pub use framework::*;
