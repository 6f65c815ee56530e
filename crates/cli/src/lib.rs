//! CLI tool for inspecting bounded-load hash rings.
//!
//! Provides commands for:
//! - Locating the owner of a key
//! - Listing replica candidates
//! - Showing the load distribution
//! - Previewing partition movement for a membership change

pub mod commands;
pub mod config;

pub use commands::{Command, CommandResult};
pub use config::CliConfig;
