//! siteswap - publish builder bundles to a served directory.

mod cli;
mod config;
mod core;
mod engine;
mod logger;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::{SiteConfig, init_config};

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    core::setup_shutdown_handler()?;

    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = init_config(SiteConfig::load(&cli)?);

    match &cli.command {
        Commands::Serve { .. } => cli::serve::serve(),
        Commands::Publish { bundle, label } => {
            cli::publish::publish_file(&config, bundle, label.as_deref())
        }
        Commands::Unpublish => cli::publish::unpublish(&config),
    }
}
