//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "romshelf")]
#[command(about = "Index a ROM library and manage its cover cache", long_about = None)]
pub(crate) struct Cli {
    /// Library root containing platform folders (defaults to config, then current directory)
    #[arg(short, long, global = true)]
    pub root: Option<PathBuf>,

    /// Resources root where covers are cached
    #[arg(long, global = true)]
    pub resources: Option<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write log output to a file (ANSI codes stripped)
    #[arg(long, global = true)]
    pub logfile: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Which platforms to scan, and how much of each.
#[derive(Args, Clone)]
pub(crate) struct ScanFilterArgs {
    /// Platform folder names (e.g., n64,gc,psx). Defaults to every platform.
    #[arg(short, long, value_delimiter = ',')]
    pub platforms: Option<Vec<String>>,

    /// Maximum number of ROMs to print per platform
    #[arg(short, long)]
    pub limit: Option<usize>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// List platforms in the library
    Platforms,

    /// Scan platforms and list their ROMs with sizes and cached covers
    Scan {
        #[command(flatten)]
        filter: ScanFilterArgs,

        /// Print machine-readable JSON instead of a listing
        #[arg(long)]
        json: bool,
    },

    /// Compute the on-disk size of a ROM
    Size {
        /// Platform folder name
        fs_slug: String,

        /// ROM file name, or directory name for a multi-file ROM
        file_name: String,

        /// Part file inside the ROM directory (repeat for each part)
        #[arg(long = "part")]
        parts: Vec<String>,
    },

    /// Resolve (and optionally fetch) the cover of a ROM
    Cover {
        /// Platform folder name
        fs_slug: String,

        /// ROM name (file name without extension)
        rom_name: String,

        /// Remote cover URL to fetch when nothing is cached
        #[arg(long)]
        url: Option<String>,

        /// Fetch again even if a cover is already cached
        #[arg(long)]
        overwrite: bool,
    },

    /// List ROMs of a platform that have cached covers
    Covers {
        /// Platform folder name
        fs_slug: String,
    },

    /// Show or edit the configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show the effective configuration and where it came from
    Show,

    /// Print the config file path
    Path,

    /// Bind a platform folder to a canonical platform slug
    Bind {
        /// Platform folder name as it appears on disk
        fs_slug: String,

        /// Canonical platform slug (e.g., ngc)
        slug: String,
    },

    /// Remove a platform binding
    Unbind {
        /// Platform folder name
        fs_slug: String,
    },
}
