//! Shared types for the romshelf workspace.
//!
//! Everything here is transient: platforms, ROM entries and cover results are
//! computed fresh by each scan or resolution and never outlive the call that
//! produced them.

pub mod cover;
pub mod error;
pub mod platform;
pub mod rom;
pub mod util;

pub use cover::{CoverResult, CoverSize, DEFAULT_PATH_COVER_L, DEFAULT_PATH_COVER_S};
pub use error::ShelfError;
pub use platform::Platform;
pub use rom::RomEntry;

/// Result alias used by every romshelf library crate.
pub type Result<T> = std::result::Result<T, ShelfError>;
