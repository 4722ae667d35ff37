//! Cover cache under the resources root.
//!
//! ```text
//! {resources}/{fs_slug}/{encoded rom name}/cover/small.png
//! {resources}/{fs_slug}/{encoded rom name}/cover/big.png
//! {resources}/default/default/cover/{small,big}.png
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use romshelf_core::util::is_plain_segment;
use romshelf_core::{CoverResult, CoverSize, Result, ShelfError};
use romshelf_lib::{ExclusionFilter, FileClass};

use crate::encode::{cover_path, decode_segment};
use crate::fetch::{CoverFetcher, OfflineFetcher};
use crate::normalize::{normalize_cover, placeholder_cover};

static TMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Resolves ROM covers to paths relative to the resources root, fetching and
/// caching them on demand.
///
/// Safe to share between threads. Two callers resolving the same ROM at once
/// may both fetch it; the last rename wins and readers never see a partial file.
pub struct CoverResolver {
    root: PathBuf,
    filter: ExclusionFilter,
    fetcher: Box<dyn CoverFetcher>,
}

impl CoverResolver {
    pub fn new(
        root: impl Into<PathBuf>,
        filter: ExclusionFilter,
        fetcher: impl CoverFetcher + 'static,
    ) -> Self {
        Self {
            root: root.into(),
            filter,
            fetcher: Box::new(fetcher),
        }
    }

    /// A resolver that never touches the network.
    pub fn offline(root: impl Into<PathBuf>, filter: ExclusionFilter) -> Self {
        Self::new(root, filter, OfflineFetcher)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Cover paths for a ROM, fetching `url_cover` when needed.
    ///
    /// Each variant is handled on its own: it is fetched when a URL is given
    /// and either `overwrite` is set or nothing is cached yet. If the variant
    /// is cached afterwards its derived path is returned, otherwise the
    /// default path. Fetch and write failures are logged, never returned.
    pub fn get_rom_cover(
        &self,
        overwrite: bool,
        fs_slug: &str,
        rom_name: &str,
        url_cover: Option<&str>,
    ) -> CoverResult {
        let url_cover = url_cover.map(str::trim).filter(|u| !u.is_empty());
        let mut result = CoverResult::defaults();

        for size in CoverSize::ALL {
            let Some(rel) = cover_path(fs_slug, rom_name, size) else {
                log::warn!("No cover path for '{rom_name}' on platform '{fs_slug}'");
                self.ensure_default(size);
                continue;
            };
            let dest = self.root.join(&rel);

            if let Some(url) = url_cover {
                if overwrite || !dest.is_file() {
                    match self.store(url, size, &dest) {
                        Ok(()) => log::debug!("Cached {size} cover for '{rom_name}'"),
                        Err(e) => log::warn!(
                            "Could not cache {size} cover for '{rom_name}' ({fs_slug}): {e}"
                        ),
                    }
                }
            }

            if dest.is_file() {
                result.set_path(size, rel);
            } else {
                self.ensure_default(size);
            }
        }
        result
    }

    /// True if the given variant of a ROM's cover is cached.
    pub fn cover_exists(&self, fs_slug: &str, rom_name: &str, size: CoverSize) -> bool {
        cover_path(fs_slug, rom_name, size).is_some_and(|rel| self.root.join(rel).is_file())
    }

    /// Write the default cover assets if they are not there yet.
    pub fn install_default_covers(&self) -> Result<()> {
        for size in CoverSize::ALL {
            let dest = self.root.join(size.default_path());
            if dest.is_file() {
                continue;
            }
            write_atomic(&dest, &placeholder_cover(size)?)?;
            log::debug!("Installed default {size} cover at {}", dest.display());
        }
        Ok(())
    }

    /// Names of the ROMs of a platform that have at least one cached cover,
    /// sorted. Directories matching the resource exclusion rules are skipped.
    /// Names starting with a dot are listed like any other.
    pub fn cached_roms(&self, fs_slug: &str) -> Result<Vec<String>> {
        if !is_plain_segment(fs_slug) {
            return Err(ShelfError::platform_not_found(fs_slug));
        }
        let dir = self.root.join(fs_slug);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(ShelfError::filesystem(&dir, e)),
        };

        let mut names = Vec::new();
        for entry in entries.flatten() {
            if !entry.path().is_dir() {
                continue;
            }
            let Ok(segment) = entry.file_name().into_string() else {
                continue;
            };
            let Some(rom_name) = decode_segment(&segment) else {
                log::debug!("Ignoring undecodable resource directory '{segment}'");
                continue;
            };
            if self.filter.is_excluded(&rom_name, FileClass::Resource) {
                continue;
            }
            if CoverSize::ALL
                .iter()
                .any(|&size| self.cover_exists(fs_slug, &rom_name, size))
            {
                names.push(rom_name);
            }
        }
        names.sort();
        Ok(names)
    }

    fn store(&self, url: &str, size: CoverSize, dest: &Path) -> Result<()> {
        let bytes = self.fetcher.fetch(url, size)?;
        let png = normalize_cover(&bytes, size)?;
        write_atomic(dest, &png)
    }

    fn ensure_default(&self, size: CoverSize) {
        if self.root.join(size.default_path()).is_file() {
            return;
        }
        if let Err(e) = self.install_default_covers() {
            log::warn!("Could not install default covers: {e}");
        }
    }
}

/// Write through a uniquely named sibling file and rename it into place.
fn write_atomic(dest: &Path, bytes: &[u8]) -> Result<()> {
    let parent = dest
        .parent()
        .ok_or_else(|| ShelfError::filesystem(dest, io::Error::other("no parent directory")))?;
    fs::create_dir_all(parent).map_err(|e| ShelfError::filesystem(parent, e))?;

    let file_name = dest
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let tmp = parent.join(format!(
        ".{file_name}.{}.{}.tmp",
        std::process::id(),
        TMP_COUNTER.fetch_add(1, Ordering::Relaxed)
    ));

    let written = fs::write(&tmp, bytes)
        .map_err(|e| ShelfError::filesystem(&tmp, e))
        .and_then(|()| fs::rename(&tmp, dest).map_err(|e| ShelfError::filesystem(dest, e)));
    if written.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    written
}
