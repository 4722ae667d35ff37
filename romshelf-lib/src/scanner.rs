//! ROM scanner for a platform's roms directory.
//!
//! Each top-level entry becomes at most one [`RomEntry`]:
//!
//! - a regular file is a single ROM
//! - a directory with 2+ remaining files is a multi-file ROM named after the directory
//! - a directory with exactly 1 remaining file is a single ROM named after that file
//! - a directory with no remaining files is dropped
//!
//! "Remaining" means after hidden files and single-file exclusions are removed.
//! Entries are visited in lexicographic order so repeated scans of an
//! unchanged tree give identical results.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use romshelf_core::util::{is_hidden_name, is_plain_segment};
use romshelf_core::{Result, RomEntry, ShelfError};

use crate::exclude::{ExclusionFilter, FileClass};
use crate::library::Library;

/// Outcome of scanning one platform.
#[derive(Debug, Default)]
pub struct RomScan {
    /// ROMs found, in name order.
    pub roms: Vec<RomEntry>,
    /// Entries that were found but could not be measured.
    pub skipped: Vec<SkippedRom>,
}

/// An entry left out of a scan because one of its files could not be read.
#[derive(Debug)]
pub struct SkippedRom {
    pub file_name: String,
    pub error: ShelfError,
}

impl RomScan {
    pub fn total_size(&self) -> u64 {
        self.roms.iter().map(|r| r.size_bytes).sum()
    }
}

impl Library {
    /// Path of a platform's ROM directory relative to the library root
    /// (`"{fs_slug}/roms"` in the platform-first layout).
    pub fn get_fs_structure(&self, fs_slug: &str) -> Result<String> {
        self.resolve_platform_root(fs_slug)?;
        Ok(self.layout().fs_structure(fs_slug))
    }

    /// All ROMs of a platform, in name order. Entries whose size cannot be
    /// computed are logged and left out.
    pub fn get_roms(&self, fs_slug: &str) -> Result<Vec<RomEntry>> {
        Ok(self.scan_roms(fs_slug)?.roms)
    }

    /// Like [`get_roms`](Self::get_roms), but also reports skipped entries.
    pub fn scan_roms(&self, fs_slug: &str) -> Result<RomScan> {
        let roms_dir = self.root().join(self.get_fs_structure(fs_slug)?);
        log::debug!("Scanning {}", roms_dir.display());
        scan_roms_dir(&roms_dir, self.filter())
    }

    /// Total on-disk size of a ROM.
    ///
    /// `roms_path` is relative to the library root, as returned by
    /// [`get_fs_structure`](Self::get_fs_structure). For a multi-file ROM,
    /// `file_name` is the directory and `multi_files` its parts. Any missing
    /// file is a `Filesystem` error. A path component that is empty, `.`,
    /// `..` or contains a separator is `NotFound`.
    pub fn get_rom_file_size(
        &self,
        roms_path: &str,
        file_name: &str,
        multi: bool,
        multi_files: &[String],
    ) -> Result<u64> {
        let base = self.rom_path(roms_path, file_name)?;
        if !multi {
            return file_size(&base);
        }
        Ok(self
            .get_rom_part_sizes(roms_path, file_name, multi_files)?
            .iter()
            .map(|(_, size)| size)
            .sum())
    }

    /// Size of every part of a multi-file ROM, in the order given.
    pub fn get_rom_part_sizes(
        &self,
        roms_path: &str,
        file_name: &str,
        multi_files: &[String],
    ) -> Result<Vec<(String, u64)>> {
        let base = self.rom_path(roms_path, file_name)?;
        multi_files
            .iter()
            .map(|part| {
                if !is_plain_segment(part) {
                    return Err(ShelfError::not_found("ROM part", part.as_str()));
                }
                Ok((part.clone(), file_size(&base.join(part))?))
            })
            .collect()
    }

    /// `{root}/{roms_path}/{file_name}`, refusing any component that could
    /// leave the library.
    fn rom_path(&self, roms_path: &str, file_name: &str) -> Result<PathBuf> {
        if !roms_path.split('/').all(is_plain_segment) {
            return Err(ShelfError::not_found("roms directory", roms_path));
        }
        if !is_plain_segment(file_name) {
            return Err(ShelfError::not_found("ROM", file_name));
        }
        Ok(self.root().join(roms_path).join(file_name))
    }
}

/// Scan a ROM directory and return its entries.
///
/// Fails only if `roms_dir` itself cannot be listed. Problems with individual
/// entries end up in [`RomScan::skipped`].
pub fn scan_roms_dir(roms_dir: &Path, filter: &ExclusionFilter) -> Result<RomScan> {
    let mut scan = RomScan::default();

    let entries = sorted_entries(roms_dir).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => {
            ShelfError::not_found("roms directory", roms_dir.display().to_string())
        }
        _ => ShelfError::filesystem(roms_dir, e),
    })?;

    for (name, path) in entries {
        let meta = match fs::metadata(&path) {
            Ok(m) => m,
            Err(e) => {
                log::warn!("Skipping {}: {}", path.display(), e);
                scan.skipped.push(SkippedRom {
                    file_name: name,
                    error: ShelfError::filesystem(&path, e),
                });
                continue;
            }
        };

        let rom = if meta.is_file() {
            if filter.is_excluded(&name, FileClass::Single) {
                log::debug!("Excluded file '{name}'");
                continue;
            }
            RomEntry::single(name)
        } else if meta.is_dir() {
            if filter.is_excluded(&name, FileClass::Multi) {
                log::debug!("Excluded directory '{name}'");
                continue;
            }
            let mut parts = match list_parts(&path, filter) {
                Ok(parts) => parts,
                Err(e) => {
                    log::warn!("Skipping {}: {}", path.display(), e);
                    scan.skipped.push(SkippedRom {
                        file_name: name,
                        error: ShelfError::filesystem(&path, e),
                    });
                    continue;
                }
            };
            match parts.len() {
                0 => {
                    log::debug!("Directory '{name}' has no ROM files left");
                    continue;
                }
                1 => RomEntry::nested(name, parts.remove(0)),
                _ => RomEntry::multi(name, parts),
            }
        } else {
            continue;
        };

        match entry_size(roms_dir, &rom) {
            Ok(size) => scan.roms.push(rom.with_size(size)),
            Err(error) => {
                log::warn!("Skipping '{}': {}", rom.file_name, error);
                scan.skipped.push(SkippedRom {
                    file_name: rom.file_name,
                    error,
                });
            }
        }
    }

    Ok(scan)
}

/// Non-hidden entries of a directory, sorted by name. Names that are not
/// valid UTF-8 are skipped with a warning.
fn sorted_entries(dir: &Path) -> io::Result<Vec<(String, PathBuf)>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        match entry.file_name().into_string() {
            Ok(name) if is_hidden_name(&name) => {}
            Ok(name) => entries.push((name, entry.path())),
            Err(raw) => log::warn!("Skipping non UTF-8 name {:?} in {}", raw, dir.display()),
        }
    }
    entries.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(entries)
}

/// Part files directly inside a ROM directory, after single-file exclusions.
///
/// Dangling symlinks count as parts so that the size step reports them
/// instead of the title silently losing a disc.
fn list_parts(dir: &Path, filter: &ExclusionFilter) -> io::Result<Vec<String>> {
    let mut parts = Vec::new();
    for (name, path) in sorted_entries(dir)? {
        let is_part = match fs::metadata(&path) {
            Ok(meta) => meta.is_file(),
            Err(_) => fs::symlink_metadata(&path)
                .map(|m| m.file_type().is_symlink())
                .unwrap_or(false),
        };
        if !is_part {
            continue;
        }
        if filter.is_excluded(&name, FileClass::Single) {
            log::debug!("Excluded part '{name}' in {}", dir.display());
            continue;
        }
        parts.push(name);
    }
    Ok(parts)
}

fn entry_size(roms_dir: &Path, rom: &RomEntry) -> Result<u64> {
    rom.relative_paths()
        .iter()
        .try_fold(0u64, |total, rel| Ok(total + file_size(&roms_dir.join(rel))?))
}

fn file_size(path: &Path) -> Result<u64> {
    let meta = fs::metadata(path).map_err(|e| ShelfError::filesystem(path, e))?;
    if !meta.is_file() {
        return Err(ShelfError::filesystem(
            path,
            io::Error::new(io::ErrorKind::InvalidInput, "not a regular file"),
        ));
    }
    Ok(meta.len())
}
