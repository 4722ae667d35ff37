use std::fmt;

use serde::{Deserialize, Serialize};

/// Resource path of the bundled small default cover.
pub const DEFAULT_PATH_COVER_S: &str = "default/default/cover/small.png";

/// Resource path of the bundled large default cover.
pub const DEFAULT_PATH_COVER_L: &str = "default/default/cover/big.png";

/// The two cover variants kept for every ROM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoverSize {
    Small,
    Big,
}

impl CoverSize {
    pub const ALL: [CoverSize; 2] = [CoverSize::Small, CoverSize::Big];

    /// File stem of the cached image (`small.png` / `big.png`).
    pub fn file_stem(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Big => "big",
        }
    }

    /// Largest (width, height) stored for this variant. Bigger images are
    /// downscaled, smaller ones are kept as-is.
    pub fn max_dimensions(self) -> (u32, u32) {
        match self {
            Self::Small => (90, 120),
            Self::Big => (264, 352),
        }
    }

    /// IGDB image size token for this variant.
    pub fn igdb_token(self) -> &'static str {
        match self {
            Self::Small => "t_cover_small",
            Self::Big => "t_cover_big",
        }
    }

    pub fn default_path(self) -> &'static str {
        match self {
            Self::Small => DEFAULT_PATH_COVER_S,
            Self::Big => DEFAULT_PATH_COVER_L,
        }
    }
}

impl fmt::Display for CoverSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_stem())
    }
}

/// Resolved cover locations, relative to the resources root.
///
/// Both paths are always populated: when nothing else resolves they point at
/// the default assets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverResult {
    pub path_cover_s: String,
    pub path_cover_l: String,
}

impl CoverResult {
    pub fn defaults() -> Self {
        Self {
            path_cover_s: DEFAULT_PATH_COVER_S.to_string(),
            path_cover_l: DEFAULT_PATH_COVER_L.to_string(),
        }
    }

    pub fn path(&self, size: CoverSize) -> &str {
        match size {
            CoverSize::Small => &self.path_cover_s,
            CoverSize::Big => &self.path_cover_l,
        }
    }

    pub fn set_path(&mut self, size: CoverSize, path: String) {
        match size {
            CoverSize::Small => self.path_cover_s = path,
            CoverSize::Big => self.path_cover_l = path,
        }
    }

    /// True if neither variant resolved to a cached cover.
    pub fn is_default(&self) -> bool {
        self.path_cover_s == DEFAULT_PATH_COVER_S && self.path_cover_l == DEFAULT_PATH_COVER_L
    }
}

impl Default for CoverResult {
    fn default() -> Self {
        Self::defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_populate_both_variants() {
        let result = CoverResult::default();
        assert_eq!(result.path(CoverSize::Small), DEFAULT_PATH_COVER_S);
        assert_eq!(result.path(CoverSize::Big), DEFAULT_PATH_COVER_L);
        assert!(result.is_default());
    }

    #[test]
    fn set_path_targets_one_variant() {
        let mut result = CoverResult::defaults();
        result.set_path(CoverSize::Big, "n64/Paper%20Mario/cover/big.png".to_string());
        assert_eq!(result.path_cover_s, DEFAULT_PATH_COVER_S);
        assert_eq!(result.path_cover_l, "n64/Paper%20Mario/cover/big.png");
        assert!(!result.is_default());
    }

    #[test]
    fn small_variant_fits_inside_big() {
        let (sw, sh) = CoverSize::Small.max_dimensions();
        let (bw, bh) = CoverSize::Big.max_dimensions();
        assert!(sw < bw && sh < bh);
        assert_eq!(CoverSize::Small.to_string(), "small");
        assert_eq!(CoverSize::Big.to_string(), "big");
    }
}
