//! Media fetcher abstraction.
//!
//! The coordinator only sees this trait; `YtDlpFetcher` is the production
//! implementation and tests plug in scripted fetchers.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::download::error::DownloadError;
use crate::download::request::DownloadRequest;

/// Resolves a request into local media files.
#[async_trait]
pub trait MediaFetcher: Send + Sync {
    /// Human-readable name of this fetcher (e.g., "yt-dlp")
    fn name(&self) -> &str;

    /// Downloads every item of the request into `dest_dir`.
    ///
    /// Returns one path per resolved item, in playlist order. On success the
    /// list is non-empty and every path exists. Files written before a failure
    /// stay in `dest_dir`; the caller owns that directory and cleans it up.
    async fn fetch(&self, request: &DownloadRequest, dest_dir: &Path) -> Result<Vec<PathBuf>, DownloadError>;
}
