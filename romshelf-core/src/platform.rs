use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A platform directory discovered under the library root.
///
/// `fs_slug` is the directory name as it appears on disk. `slug` is the
/// canonical identifier used by the rest of the catalog: the bound alias from
/// the `[system.platforms]` table, or the `fs_slug` itself when unbound.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Platform {
    pub slug: String,
    pub fs_slug: String,
}

/// Well-known platforms: accepted slugs (lowercase) and display name.
const KNOWN_PLATFORMS: &[(&[&str], &str)] = &[
    // Nintendo
    (&["nes", "famicom", "fc"], "Nintendo Entertainment System"),
    (&["snes", "sfc", "super-famicom"], "Super Nintendo Entertainment System"),
    (&["n64", "nintendo64"], "Nintendo 64"),
    (&["ngc", "gc", "gcn", "gamecube"], "Nintendo GameCube"),
    (&["wii"], "Nintendo Wii"),
    (&["wiiu", "wii-u"], "Nintendo Wii U"),
    (&["switch", "nsw"], "Nintendo Switch"),
    (&["gb", "gameboy"], "Game Boy"),
    (&["gbc", "gameboy-color"], "Game Boy Color"),
    (&["gba", "gameboy-advance"], "Game Boy Advance"),
    (&["nds", "ds"], "Nintendo DS"),
    (&["3ds", "n3ds"], "Nintendo 3DS"),
    (&["virtualboy", "vb"], "Virtual Boy"),
    // Sega
    (&["sg1000", "sg-1000"], "Sega SG-1000"),
    (&["sms", "mastersystem"], "Sega Master System"),
    (&["genesis", "megadrive", "genesis-slash-megadrive", "md"], "Sega Genesis / Mega Drive"),
    (&["segacd", "megacd"], "Sega CD / Mega CD"),
    (&["32x", "sega32x"], "Sega 32X"),
    (&["saturn"], "Sega Saturn"),
    (&["dreamcast", "dc"], "Sega Dreamcast"),
    (&["gamegear", "gg"], "Sega Game Gear"),
    // Sony
    (&["ps", "psx", "ps1"], "Sony PlayStation"),
    (&["ps2"], "Sony PlayStation 2"),
    (&["ps3"], "Sony PlayStation 3"),
    (&["psp"], "Sony PlayStation Portable"),
    (&["psvita", "vita"], "Sony PlayStation Vita"),
    // Microsoft
    (&["xbox"], "Microsoft Xbox"),
    (&["xbox360", "x360"], "Microsoft Xbox 360"),
    // Others
    (&["arcade", "mame"], "Arcade"),
    (&["lynx"], "Atari Lynx"),
    (&["atari2600"], "Atari 2600"),
    (&["neo-geo-pocket", "ngp"], "Neo Geo Pocket"),
    (&["neo-geo-pocket-color", "ngpc"], "Neo Geo Pocket Color"),
];

impl Platform {
    /// A platform whose slug is its directory name.
    pub fn new(fs_slug: impl Into<String>) -> Self {
        let fs_slug = fs_slug.into();
        Self {
            slug: fs_slug.clone(),
            fs_slug,
        }
    }

    /// A platform with the binding table applied to its directory name.
    pub fn with_binding(fs_slug: impl Into<String>, bindings: &BTreeMap<String, String>) -> Self {
        let fs_slug = fs_slug.into();
        let slug = bindings
            .get(&fs_slug)
            .cloned()
            .unwrap_or_else(|| fs_slug.clone());
        Self { slug, fs_slug }
    }

    /// True if a binding renamed this platform.
    pub fn is_bound(&self) -> bool {
        self.slug != self.fs_slug
    }

    /// Human-readable name, if the slug (or the directory name) is a known platform.
    pub fn display_name(&self) -> Option<&'static str> {
        known_display_name(&self.slug).or_else(|| known_display_name(&self.fs_slug))
    }
}

fn known_display_name(slug: &str) -> Option<&'static str> {
    let lower = slug.to_lowercase();
    KNOWN_PLATFORMS
        .iter()
        .find(|(aliases, _)| aliases.contains(&lower.as_str()))
        .map(|(_, name)| *name)
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.display_name() {
            Some(name) => write!(f, "{name}"),
            None => write!(f, "{}", self.slug),
        }
    }
}

#[cfg(test)]
#[path = "tests/platform_tests.rs"]
mod tests;
