/// Format a byte count with fractional KB/MB/GB (e.g., "1.5 KB", "2.3 MB").
///
/// ROM sizes are rarely exact binary multiples, so this always rounds to one
/// decimal place above 1 KB.
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;
    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Dotfiles (`.DS_Store`, `.git`, ...) are never part of a library.
pub fn is_hidden_name(name: &str) -> bool {
    name.starts_with('.')
}

/// Extension of a file name: the text after the last `.`, if the name has a
/// non-empty stem and a non-empty extension.
pub fn file_extension(name: &str) -> Option<&str> {
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => Some(ext),
        _ => None,
    }
}

/// True if `name` can be used as one path component without escaping the
/// directory it is joined to.
pub fn is_plain_segment(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\', '\0'])
}
