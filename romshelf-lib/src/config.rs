//! Shelf configuration (library root, resources root, exclusions, bindings).
//!
//! The config file lives at `~/.config/romshelf/config.toml` unless a path is
//! given explicitly. Every section is optional. The parsed [`ShelfConfig`] is
//! passed by value to whatever needs it; nothing here is global.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use romshelf_core::{Result, ShelfError};
use serde::{Deserialize, Serialize};

/// Canonical path to the config file: `~/.config/romshelf/config.toml`.
pub fn config_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("romshelf").join("config.toml")
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShelfConfig {
    pub library: LibrarySection,
    pub resources: ResourcesSection,
    pub exclude: ExclusionConfig,
    pub system: SystemSection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibrarySection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourcesSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,
}

/// Exclusion rules per file class, as written in `[exclude]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExclusionConfig {
    /// Platform directory names that are never scanned.
    pub platforms: Vec<String>,
    /// Single ROM files, and parts inside a ROM directory.
    pub single: SingleFileRules,
    /// ROM directory names.
    pub multi: NameRules,
    /// Entries of the resource cache.
    pub resource: NameRules,
}

/// Name-based rules shared by every file class.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NameRules {
    /// Exact file names.
    pub names: Vec<String>,
    /// Shell-style globs (`*.txt`), matched against the whole name.
    pub patterns: Vec<String>,
    /// Regular expressions matched at the start of the name (`_\.`).
    pub regex: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SingleFileRules {
    #[serde(flatten)]
    pub rules: NameRules,
    /// Extensions without the leading dot, compared case-insensitively.
    pub extensions: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemSection {
    /// Binding table: platform directory name -> canonical platform slug.
    pub platforms: BTreeMap<String, String>,
}

impl ShelfConfig {
    /// Load a config file. A missing file yields the default configuration.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("No config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(ShelfError::filesystem(path, e)),
        };
        Self::parse(&contents)
            .map_err(|e| ShelfError::config(format!("{}: {}", path.display(), e)))
    }

    /// Parse configuration from TOML text.
    pub fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| ShelfError::config(e.to_string()))
    }

    /// Render the configuration as pretty TOML for display.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| ShelfError::config(e.to_string()))
    }

    /// The binding table (`[system.platforms]`).
    pub fn bindings(&self) -> &BTreeMap<String, String> {
        &self.system.platforms
    }

    /// Resolve the library root using a priority chain:
    ///
    /// 1. CLI override (if `Some`)
    /// 2. `library.root` in the config
    /// 3. Current working directory
    pub fn resolve_library_root(&self, cli_override: Option<PathBuf>) -> PathBuf {
        if let Some(p) = cli_override {
            return p;
        }
        if let Some(p) = self.library.root.clone() {
            return p;
        }
        std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
    }

    /// Resolve the resources root using a priority chain:
    ///
    /// 1. CLI override (if `Some`)
    /// 2. `resources.root` in the config
    /// 3. `~/.local/share/romshelf/resources` (platform data dir)
    pub fn resolve_resources_root(&self, cli_override: Option<PathBuf>) -> PathBuf {
        if let Some(p) = cli_override {
            return p;
        }
        if let Some(p) = self.resources.root.clone() {
            return p;
        }
        let data = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        data.join("romshelf").join("resources")
    }
}

/// Bind a platform directory name to a canonical slug in the config file.
pub fn add_binding(path: &Path, fs_slug: &str, slug: &str) -> Result<()> {
    update_bindings(path, |table| {
        table.insert(fs_slug.to_string(), toml::Value::String(slug.to_string()));
    })
}

/// Remove a platform binding from the config file. Removing a binding that
/// does not exist is not an error.
pub fn remove_binding(path: &Path, fs_slug: &str) -> Result<()> {
    update_bindings(path, |table| {
        table.remove(fs_slug);
    })
}

/// Edit `[system.platforms]` in place.
///
/// Works on a `toml::Value` rather than [`ShelfConfig`] so keys this version
/// does not know about are preserved.
fn update_bindings(path: &Path, edit: impl FnOnce(&mut toml::Table)) -> Result<()> {
    let mut doc: toml::Value = match fs::read_to_string(path) {
        Ok(contents) => contents
            .parse()
            .map_err(|e: toml::de::Error| ShelfError::config(format!("{}: {}", path.display(), e)))?,
        Err(e) if e.kind() == io::ErrorKind::NotFound => toml::Value::Table(Default::default()),
        Err(e) => return Err(ShelfError::filesystem(path, e)),
    };

    let root = doc
        .as_table_mut()
        .ok_or_else(|| ShelfError::config("config root is not a table"))?;
    let system = root
        .entry("system")
        .or_insert_with(|| toml::Value::Table(Default::default()))
        .as_table_mut()
        .ok_or_else(|| ShelfError::config("[system] is not a table"))?;
    let platforms = system
        .entry("platforms")
        .or_insert_with(|| toml::Value::Table(Default::default()))
        .as_table_mut()
        .ok_or_else(|| ShelfError::config("[system.platforms] is not a table"))?;

    edit(platforms);

    // Write atomically
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| ShelfError::filesystem(parent, e))?;
    }
    let serialized = toml::to_string_pretty(&doc).map_err(|e| ShelfError::config(e.to_string()))?;
    let tmp = path.with_extension("toml.tmp");
    fs::write(&tmp, &serialized).map_err(|e| ShelfError::filesystem(&tmp, e))?;
    fs::rename(&tmp, path).map_err(|e| ShelfError::filesystem(path, e))?;

    Ok(())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
