//! # Sentinel Common
//!
//! Shared types, utilities, and common functionality for Sentinel.
//!
//! This crate provides the id newtypes, platform value types, error kinds,
//! reply formatting helpers and logging bootstrap used across all other
//! crates in the Sentinel workspace.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod logging;
pub mod purge;
pub mod types;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use error::*;
pub use purge::*;
pub use types::*;
pub use utils::*;
