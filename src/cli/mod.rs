//! CLI module for Showroom.

mod commands;

pub use commands::{Cli, Commands, run_command};
