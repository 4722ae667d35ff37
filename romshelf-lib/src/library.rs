//! Platform discovery under the library root.
//!
//! Two layouts are recognised:
//!
//! - platform-first: `{root}/{fs_slug}/roms/...`
//! - roms-first: `{root}/roms/{fs_slug}/...`, used whenever `{root}/roms` exists

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use romshelf_core::util::{is_hidden_name, is_plain_segment};
use romshelf_core::{Platform, Result, ShelfError};

use crate::config::ShelfConfig;
use crate::exclude::{ExclusionFilter, FileClass};

/// Name of the directory that holds ROM content.
pub const ROMS_DIR: &str = "roms";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LibraryLayout {
    /// `{fs_slug}/roms`
    PlatformFirst,
    /// `roms/{fs_slug}`
    RomsFirst,
}

impl LibraryLayout {
    pub fn detect(root: &Path) -> Self {
        if root.join(ROMS_DIR).is_dir() {
            Self::RomsFirst
        } else {
            Self::PlatformFirst
        }
    }

    /// Path of a platform's ROM directory relative to the library root,
    /// always `/`-separated.
    pub fn fs_structure(self, fs_slug: &str) -> String {
        match self {
            Self::PlatformFirst => format!("{fs_slug}/{ROMS_DIR}"),
            Self::RomsFirst => format!("{ROMS_DIR}/{fs_slug}"),
        }
    }
}

/// A ROM library rooted at one directory, with its exclusion rules and
/// platform bindings.
#[derive(Debug, Clone)]
pub struct Library {
    root: PathBuf,
    filter: ExclusionFilter,
    bindings: BTreeMap<String, String>,
}

impl Library {
    /// Open a library, compiling the exclusion rules from `config`.
    pub fn new(root: impl Into<PathBuf>, config: &ShelfConfig) -> Result<Self> {
        Ok(Self::with_filter(
            root,
            ExclusionFilter::new(&config.exclude)?,
            config.bindings().clone(),
        ))
    }

    pub fn with_filter(
        root: impl Into<PathBuf>,
        filter: ExclusionFilter,
        bindings: BTreeMap<String, String>,
    ) -> Self {
        Self {
            root: root.into(),
            filter,
            bindings,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn filter(&self) -> &ExclusionFilter {
        &self.filter
    }

    /// Layout of the library as it is on disk right now.
    pub fn layout(&self) -> LibraryLayout {
        LibraryLayout::detect(&self.root)
    }

    fn platforms_dir(&self) -> PathBuf {
        match self.layout() {
            LibraryLayout::PlatformFirst => self.root.clone(),
            LibraryLayout::RomsFirst => self.root.join(ROMS_DIR),
        }
    }

    /// Directory names of every platform in the library, sorted.
    ///
    /// Hidden directories and platforms excluded by name are skipped.
    pub fn list_platforms(&self) -> Result<BTreeSet<String>> {
        let dir = self.platforms_dir();
        let entries = fs::read_dir(&dir).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ShelfError::not_found("library root", dir.display().to_string()),
            _ => ShelfError::filesystem(&dir, e),
        })?;

        let mut platforms = BTreeSet::new();
        for entry in entries.flatten() {
            let Ok(name) = entry.file_name().into_string() else {
                log::warn!("Skipping non UTF-8 directory name in {}", dir.display());
                continue;
            };
            if is_hidden_name(&name) || !entry.path().is_dir() {
                continue;
            }
            if self.filter.is_excluded(&name, FileClass::Platform) {
                log::debug!("Platform '{name}' is excluded");
                continue;
            }
            platforms.insert(name);
        }
        Ok(platforms)
    }

    /// Every platform in the library with bindings applied, sorted by directory name.
    pub fn platforms(&self) -> Result<Vec<Platform>> {
        Ok(self
            .list_platforms()?
            .into_iter()
            .map(|fs_slug| Platform::with_binding(fs_slug, &self.bindings))
            .collect())
    }

    /// A single platform with its binding applied. Fails if the directory is absent.
    pub fn platform(&self, fs_slug: &str) -> Result<Platform> {
        self.resolve_platform_root(fs_slug)?;
        Ok(Platform::with_binding(fs_slug, &self.bindings))
    }

    /// Directory of a platform. Fails with `NotFound` when it does not exist
    /// or is excluded by name.
    pub fn resolve_platform_root(&self, fs_slug: &str) -> Result<PathBuf> {
        if !is_plain_segment(fs_slug) || self.filter.is_excluded(fs_slug, FileClass::Platform) {
            return Err(ShelfError::platform_not_found(fs_slug));
        }
        let path = self.platforms_dir().join(fs_slug);
        if path.is_dir() {
            Ok(path)
        } else {
            Err(ShelfError::platform_not_found(fs_slug))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fs_structure_per_layout() {
        assert_eq!(LibraryLayout::PlatformFirst.fs_structure("n64"), "n64/roms");
        assert_eq!(LibraryLayout::RomsFirst.fs_structure("n64"), "roms/n64");
    }

    #[test]
    fn path_like_slugs_are_not_platforms() {
        let library = Library::with_filter(".", ExclusionFilter::none(), BTreeMap::new());
        for slug in ["", ".", "..", "../etc", "n64/roms"] {
            let err = library.resolve_platform_root(slug).unwrap_err();
            assert!(err.is_not_found(), "'{slug}' gave {err:?}");
        }
    }
}
