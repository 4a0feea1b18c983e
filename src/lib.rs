//! fieldtracker library root.
//! Exposes CLI parser, high-level run() function, and internal modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod geo;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Employee { .. } => cli::commands::employee::handle(&cli.command, cfg),
        Commands::Geofence { .. } => cli::commands::geofence::handle(&cli.command, cfg),
        Commands::Assign { .. } => cli::commands::assign::handle(&cli.command, cfg),
        Commands::Checkin { .. } => cli::commands::checkin::handle(&cli.command, cfg),
        Commands::Track { .. } => cli::commands::track::handle(&cli.command, cfg),
        Commands::Checkout { .. } => cli::commands::checkout::handle(&cli.command, cfg),
        Commands::Trail { .. } => cli::commands::trail::handle(&cli.command, cfg),
        Commands::Sessions { .. } => cli::commands::sessions::handle(&cli.command, cfg),
        Commands::Summary { .. } => cli::commands::summary::handle(&cli.command, cfg),
        Commands::Purge { .. } => cli::commands::purge::handle(&cli.command, cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
        Commands::Export { .. } => cli::commands::export::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // Load config once, then apply the CLI database override
    let mut cfg = Config::load();
    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    dispatch(&cli, &cfg)
}
