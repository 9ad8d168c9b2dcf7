//! Factory attendance CLI library.
//!
//! This crate provides the CLI interface for the attendance suite.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands, RosterAction};
pub use config::Config;
