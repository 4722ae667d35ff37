use romshelf_lib::ShelfError;
use thiserror::Error;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Library, config or resource error
    #[error("{0}")]
    Shelf(#[from] ShelfError),

    /// Platform folder that is not in the library
    #[error("Unknown platform: {0}")]
    UnknownPlatform(String),

    /// Invalid command-line input
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Catch-all for other errors
    #[error("{0}")]
    Other(String),
}

impl CliError {
    pub(crate) fn unknown_platform(msg: impl Into<String>) -> Self {
        Self::UnknownPlatform(msg.into())
    }

    pub(crate) fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub(crate) fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// Turn a library `NotFound` for a platform into the CLI's own variant.
    pub(crate) fn for_platform(err: ShelfError, fs_slug: &str) -> Self {
        match err {
            ShelfError::NotFound {
                what: "platform", ..
            } => Self::unknown_platform(fs_slug),
            other => Self::Shelf(other),
        }
    }
}
