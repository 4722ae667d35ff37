//! Cover resources: deterministic cache paths, remote fetch, default fallback.

pub mod cover;
pub mod encode;
pub mod fetch;
pub mod normalize;

pub use cover::CoverResolver;
pub use encode::{cover_path, decode_segment, encode_segment};
pub use fetch::{CoverFetcher, HttpCoverFetcher, OfflineFetcher, sized_url};
pub use normalize::{normalize_cover, placeholder_cover, scale_to_fit};
