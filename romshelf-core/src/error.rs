use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur while indexing a library or resolving its resources.
#[derive(Debug, Error)]
pub enum ShelfError {
    /// A platform or path that was asked for does not exist
    #[error("{what} not found: {name}")]
    NotFound { what: &'static str, name: String },

    /// A file or directory could not be read
    #[error("filesystem error at {path:?}: {source}")]
    Filesystem {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A remote cover could not be fetched or decoded
    #[error("cover fetch failed: {0}")]
    Fetch(String),

    /// An exclusion glob or regex failed to compile
    #[error("invalid exclusion pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// Configuration could not be read, parsed or written
    #[error("config error: {0}")]
    Config(String),
}

impl ShelfError {
    pub fn not_found(what: &'static str, name: impl Into<String>) -> Self {
        Self::NotFound {
            what,
            name: name.into(),
        }
    }

    pub fn platform_not_found(fs_slug: impl Into<String>) -> Self {
        Self::not_found("platform", fs_slug)
    }

    pub fn filesystem(path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::Filesystem {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn fetch(msg: impl Into<String>) -> Self {
        Self::Fetch(msg.into())
    }

    pub fn invalid_pattern(pattern: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            reason: reason.to_string(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
