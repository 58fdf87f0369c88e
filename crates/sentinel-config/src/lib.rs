//! # Sentinel Config
//!
//! Type-safe configuration management for Sentinel.
//!
//! This crate provides the configuration schema, its defaults, and loading
//! from a `secrets.env` file layered under the process environment.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod defaults;
pub mod loader;
pub mod schema;

pub use defaults::*;
pub use loader::*;
pub use schema::*;
