//! Showroom - a desktop portfolio showcase.
//!
//! Presents an artisan's work as a filterable gallery with a lightbox
//! viewer, accompanied by a floating ambient playlist player. The
//! showcase content (tracks and gallery items) comes from a TOML
//! manifest; see `manifest.rs` for the format.

pub mod cli;
pub mod config;
pub mod error;
pub mod gallery;
pub mod manifest;
pub mod model;
pub mod player;
#[cfg(test)]
pub mod test_utils;
pub mod ui;

use clap::Parser;
use iced::application;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use ui::Showroom;

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(EnvFilter::from_default_env().add_directive("showroom=info".parse().unwrap()))
        .init();

    // Try to run a CLI command
    if cli::run_command(&args)? {
        // A command was executed, exit normally
        return Ok(());
    }

    // No command specified, launch the GUI
    let config = config::load();
    let manifest_path = args
        .manifest
        .clone()
        .or_else(|| config.showcase.manifest.clone())
        .unwrap_or_else(|| PathBuf::from("showcase.toml"));

    application("Showroom", Showroom::update, Showroom::view)
        .subscription(Showroom::subscription)
        .run_with(move || Showroom::new(manifest_path.clone(), config.clone()))
        .map_err(|e| anyhow::anyhow!("GUI Error: {}", e))
}
