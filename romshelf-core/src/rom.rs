use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A logical game found in a platform's roms directory.
///
/// Either a single file, or a directory whose parts together make up one
/// title (multi-disc images, split dumps). `multi` is true exactly when
/// `multi_files` holds two or more parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RomEntry {
    /// File name for single ROMs, directory name for multi-file ROMs.
    pub file_name: String,
    pub multi: bool,
    /// Part file names inside the directory, in stable order. Empty when not multi.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub multi_files: Vec<String>,
    /// Sum of the on-disk sizes of every constituent file.
    pub size_bytes: u64,
    /// Wrapping directory of a single ROM that was found alone inside a folder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder: Option<String>,
}

impl RomEntry {
    /// A single ROM sitting directly in the roms directory.
    pub fn single(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            multi: false,
            multi_files: Vec::new(),
            size_bytes: 0,
            folder: None,
        }
    }

    /// A single ROM that is the only remaining file of a directory.
    pub fn nested(folder: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            folder: Some(folder.into()),
            ..Self::single(file_name)
        }
    }

    /// A multi-file ROM. Fewer than two parts does not make a multi entry.
    pub fn multi(file_name: impl Into<String>, parts: Vec<String>) -> Self {
        let multi = parts.len() >= 2;
        Self {
            file_name: file_name.into(),
            multi,
            multi_files: if multi { parts } else { Vec::new() },
            size_bytes: 0,
            folder: None,
        }
    }

    pub fn with_size(mut self, size_bytes: u64) -> Self {
        self.size_bytes = size_bytes;
        self
    }

    /// Paths of every constituent file, relative to the platform's roms directory.
    pub fn relative_paths(&self) -> Vec<PathBuf> {
        if self.multi {
            let dir = PathBuf::from(&self.file_name);
            return self.multi_files.iter().map(|part| dir.join(part)).collect();
        }
        match &self.folder {
            Some(folder) => vec![PathBuf::from(folder).join(&self.file_name)],
            None => vec![PathBuf::from(&self.file_name)],
        }
    }

    /// Name used to key resources for this ROM: the file name without its
    /// extension for single ROMs, the directory name for multi-file ROMs.
    pub fn rom_name(&self) -> &str {
        if self.multi {
            return &self.file_name;
        }
        match self.file_name.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem,
            _ => &self.file_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multi_requires_two_parts() {
        let one = RomEntry::multi("Game", vec!["Game.bin".to_string()]);
        assert!(!one.multi);
        assert!(one.multi_files.is_empty());

        let two = RomEntry::multi(
            "Game",
            vec!["Game (Disc 1).bin".to_string(), "Game (Disc 2).bin".to_string()],
        );
        assert!(two.multi);
        assert_eq!(two.multi_files.len(), 2);
    }

    #[test]
    fn relative_paths_for_each_shape() {
        assert_eq!(
            RomEntry::single("Paper Mario (USA).z64").relative_paths(),
            vec![PathBuf::from("Paper Mario (USA).z64")]
        );
        assert_eq!(
            RomEntry::nested("Tetris", "Tetris (World).gb").relative_paths(),
            vec![PathBuf::from("Tetris").join("Tetris (World).gb")]
        );
        let multi = RomEntry::multi("SM64", vec!["a.z64".to_string(), "b.z64".to_string()]);
        assert_eq!(
            multi.relative_paths(),
            vec![PathBuf::from("SM64").join("a.z64"), PathBuf::from("SM64").join("b.z64")]
        );
    }

    #[test]
    fn rom_name_strips_extension_of_single_files() {
        assert_eq!(RomEntry::single("Paper Mario (USA).z64").rom_name(), "Paper Mario (USA)");
        assert_eq!(RomEntry::single("README").rom_name(), "README");
        assert_eq!(RomEntry::single(".hidden").rom_name(), ".hidden");
        let multi = RomEntry::multi(
            "Super Mario 64 (J) (Rev A)",
            vec!["p1.z64".to_string(), "p2.z64".to_string()],
        );
        assert_eq!(multi.rom_name(), "Super Mario 64 (J) (Rev A)");
    }

    #[test]
    fn serializes_without_empty_fields() {
        let json = serde_json::to_string(&RomEntry::single("a.nes").with_size(16)).unwrap();
        assert_eq!(json, r#"{"file_name":"a.nes","multi":false,"size_bytes":16}"#);
    }
}
