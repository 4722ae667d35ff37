//! romshelf CLI
//!
//! Command-line interface for indexing a ROM library and managing its cover cache.

mod cli_types;
mod commands;
mod error;
mod logging;
mod spinner;

use clap::Parser;

use cli_types::{Cli, Commands};
use commands::Context;
use error::CliError;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.quiet, cli.verbose, cli.logfile.as_deref()) {
        eprintln!("{e}");
        std::process::exit(2);
    }

    if let Err(e) = run(cli) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let Cli {
        root,
        resources,
        config,
        quiet,
        command,
        ..
    } = cli;
    let config_path = config.unwrap_or_else(romshelf_lib::config_path);
    let load = || Context::load(&config_path, root.clone(), resources.clone());

    match command {
        Commands::Platforms => commands::platforms::run_platforms(&load()?),
        Commands::Scan { filter, json } => {
            commands::scan::run_scan(&load()?, filter.platforms, filter.limit, json, quiet)
        }
        Commands::Size {
            fs_slug,
            file_name,
            parts,
        } => commands::size::run_size(&load()?, &fs_slug, &file_name, &parts),
        Commands::Cover {
            fs_slug,
            rom_name,
            url,
            overwrite,
        } => commands::cover::run_cover(&load()?, &fs_slug, &rom_name, url.as_deref(), overwrite),
        Commands::Covers { fs_slug } => commands::covers::run_covers(&load()?, &fs_slug),
        Commands::Config { action } => {
            commands::config::run_config(action, &config_path, root.clone(), resources.clone())
        }
    }
}
