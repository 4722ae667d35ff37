//! Library indexing: configuration, exclusion rules, platform discovery and
//! ROM scanning.

pub mod config;
pub mod exclude;
pub mod library;
pub mod scanner;

pub use config::{
    ExclusionConfig, NameRules, ShelfConfig, SingleFileRules, add_binding, config_path,
    remove_binding,
};
pub use exclude::{ExclusionFilter, ExclusionRule, FileClass, RuleSet};
pub use library::{Library, LibraryLayout};
pub use scanner::{RomScan, SkippedRom, scan_roms_dir};

// Re-export core types so frontends only need this crate.
pub use romshelf_core::*;
