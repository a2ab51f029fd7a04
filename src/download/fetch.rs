//! Fetcher interfaces used by the run controller.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::Result;

/// Fetches a direct image URL into a file.
#[async_trait]
pub trait ImageFetcher: Send + Sync {
    /// Download `url` to `dest`.
    ///
    /// Returns `Ok(true)` when the body was written, `Ok(false)` when the
    /// server answered with a non-success status (nothing is written).
    async fn fetch(&self, url: &str, dest: &Path) -> Result<bool>;
}

/// Fetches videos and animated images given the post URL.
#[async_trait]
pub trait MediaFetcher: Send + Sync {
    /// Download the media of the post at `url` using `output_template`
    /// (a yt-dlp style `%(field)s` template) and return the final file path,
    /// or `None` if nothing was produced.
    async fn fetch(
        &self,
        url: &str,
        output_template: &Path,
        cookies: Option<&Path>,
    ) -> Option<PathBuf>;
}

/// The pair of fetchers a run uses.
pub struct Fetchers<'a> {
    pub images: &'a dyn ImageFetcher,
    pub videos: &'a dyn MediaFetcher,
}
