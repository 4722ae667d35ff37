//! Remote cover retrieval.

use std::time::Duration;

use romshelf_core::{CoverSize, Result, ShelfError};

/// Upper bound on a single cover download.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(120);

const USER_AGENT: &str = concat!("romshelf/", env!("CARGO_PKG_VERSION"));

/// Something that can turn a cover URL into raw image bytes.
///
/// Implemented for any matching closure, which keeps tests free of network
/// access.
pub trait CoverFetcher: Send + Sync {
    fn fetch(&self, url: &str, size: CoverSize) -> Result<Vec<u8>>;
}

impl<F> CoverFetcher for F
where
    F: Fn(&str, CoverSize) -> Result<Vec<u8>> + Send + Sync,
{
    fn fetch(&self, url: &str, size: CoverSize) -> Result<Vec<u8>> {
        self(url, size)
    }
}

/// Rewrite an IGDB thumbnail URL to the image size of `size`. Other URLs are
/// returned unchanged.
pub fn sized_url(url: &str, size: CoverSize) -> String {
    url.replace("t_thumb", size.igdb_token())
}

/// Blocking HTTP fetcher.
pub struct HttpCoverFetcher {
    http: reqwest::blocking::Client,
}

impl HttpCoverFetcher {
    pub fn new() -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ShelfError::fetch(format!("could not build HTTP client: {e}")))?;
        Ok(Self { http })
    }
}

impl CoverFetcher for HttpCoverFetcher {
    fn fetch(&self, url: &str, size: CoverSize) -> Result<Vec<u8>> {
        let url = sized_url(url, size);
        log::debug!("Fetching {size} cover from {url}");

        let response = self
            .http
            .get(&url)
            .send()
            .map_err(|e| ShelfError::fetch(format!("request to {url} failed: {e}")))?;

        if !response.status().is_success() {
            return Err(ShelfError::fetch(format!(
                "HTTP {} for {url}",
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .map_err(|e| ShelfError::fetch(format!("failed to read body of {url}: {e}")))?;
        Ok(bytes.to_vec())
    }
}

/// Fetcher for when network access is disabled. Every fetch fails, so only
/// already cached covers and the defaults are ever returned.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineFetcher;

impl CoverFetcher for OfflineFetcher {
    fn fetch(&self, url: &str, _size: CoverSize) -> Result<Vec<u8>> {
        Err(ShelfError::fetch(format!("offline, not fetching {url}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IGDB: &str = "https://images.igdb.com/igdb/image/upload/t_thumb/co1xyz.jpg";

    #[test]
    fn igdb_thumbnails_are_resized() {
        assert_eq!(
            sized_url(IGDB, CoverSize::Small),
            "https://images.igdb.com/igdb/image/upload/t_cover_small/co1xyz.jpg"
        );
        assert_eq!(
            sized_url(IGDB, CoverSize::Big),
            "https://images.igdb.com/igdb/image/upload/t_cover_big/co1xyz.jpg"
        );
    }

    #[test]
    fn other_urls_are_untouched() {
        let url = "https://example.org/box/front.png";
        assert_eq!(sized_url(url, CoverSize::Big), url);
    }

    #[test]
    fn offline_fetcher_always_fails() {
        let err = OfflineFetcher.fetch(IGDB, CoverSize::Small).unwrap_err();
        assert!(matches!(err, ShelfError::Fetch(_)));
    }

    #[test]
    fn closures_are_fetchers() {
        let fetcher = |url: &str, size: CoverSize| -> Result<Vec<u8>> {
            Ok(format!("{size}:{url}").into_bytes())
        };
        assert_eq!(fetcher.fetch("u", CoverSize::Big).unwrap(), b"big:u");
    }

    #[test]
    fn unreachable_host_is_a_fetch_error() {
        let fetcher = HttpCoverFetcher::new().unwrap();
        let err = fetcher
            .fetch("http://127.0.0.1:9/cover.png", CoverSize::Small)
            .unwrap_err();
        assert!(matches!(err, ShelfError::Fetch(_)), "got {err:?}");
    }
}
