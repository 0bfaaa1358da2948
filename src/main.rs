//! pagepack - page discovery and bundler config assembly for multi-page
//! front-end projects.

mod bundle;
mod cli;
mod config;
mod core;
mod discover;
mod logger;
mod utils;
mod watch;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::{ProjectConfig, init_config};

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    core::setup_shutdown_handler()?;

    let cli: &'static Cli = Box::leak(Box::new(Cli::parse()));

    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = init_config(ProjectConfig::load(cli)?);
    debug!("config"; "root {}", config.get_root().display());

    match &cli.command {
        Commands::Config { mode, emit } => cli::emit::emit_config(&config, mode.resolve(), emit),
        Commands::Pages { mode, pretty } => cli::pages::list_pages(&config, mode.resolve(), *pretty),
        Commands::Route { paths } => cli::route::show_routes(&config, paths),
        Commands::Watch { mode, emit } => watch::run(mode.resolve(), emit.clone()),
    }
}
