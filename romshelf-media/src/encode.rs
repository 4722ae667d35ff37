//! Cover path derivation.
//!
//! A ROM name becomes one path segment by percent-encoding every byte except
//! ASCII alphanumerics and `-_.~`. The result is safe both as a directory name
//! and inside a URL, so the same string is used on disk and when serving.

use std::borrow::Cow;

use romshelf_core::CoverSize;
use romshelf_core::util::is_plain_segment;

/// Encode a ROM name as a single path segment.
///
/// Returns `None` for an empty name. `.` and `..` have their dots encoded so
/// the segment can never point at the current or parent directory.
pub fn encode_segment(name: &str) -> Option<String> {
    if name.is_empty() {
        return None;
    }
    let encoded = urlencoding::encode(name);
    if encoded == "." || encoded == ".." {
        return Some(encoded.replace('.', "%2E"));
    }
    Some(encoded.into_owned())
}

/// Reverse of [`encode_segment`]. `None` if the segment does not decode to UTF-8.
pub fn decode_segment(segment: &str) -> Option<String> {
    urlencoding::decode(segment).ok().map(Cow::into_owned)
}

/// Resource path of a ROM's cover: `{fs_slug}/{encoded rom_name}/cover/{size}.png`.
///
/// `None` if the platform slug is not a plain directory name or the ROM name
/// is empty.
pub fn cover_path(fs_slug: &str, rom_name: &str, size: CoverSize) -> Option<String> {
    if !is_plain_segment(fs_slug) {
        return None;
    }
    let segment = encode_segment(rom_name)?;
    Some(format!("{fs_slug}/{segment}/cover/{}.png", size.file_stem()))
}
