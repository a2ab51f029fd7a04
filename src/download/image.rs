//! Photo download path.

use url::Url;

use crate::download::fetch::ImageFetcher;
use crate::download::state::DownloadState;
use crate::error::Result;
use crate::media::{MediaItem, MediaKind};

/// URL asking the CDN for the original-size image.
///
/// `None` when the URL already carries a `name` parameter or cannot be parsed.
pub fn original_size_url(url: &str) -> Option<String> {
    let mut parsed = Url::parse(url).ok()?;

    if parsed.query_pairs().any(|(key, _)| key == "name") {
        return None;
    }

    parsed.query_pairs_mut().append_pair("name", "orig");
    Some(parsed.to_string())
}

/// Download a photo of a post unless it is already on disk.
///
/// A non-success status is absorbed and leaves the item out. Errors below
/// HTTP (transport, filesystem) are returned and fail the whole post.
pub async fn download_image(
    fetcher: &dyn ImageFetcher,
    state: &mut DownloadState,
    post_id: u64,
    url: &str,
) -> Result<Option<MediaItem>> {
    let dest = state.paths.image_path(post_id, url);

    if dest.exists() {
        tracing::debug!("Skipping existing file: {}", dest.display());
        state.increment_skipped();
        return Ok(Some(MediaItem::on_disk(MediaKind::Photo, url, &dest)));
    }

    let mut written = fetcher.fetch(url, &dest).await?;

    if !written {
        if let Some(alt) = original_size_url(url) {
            tracing::debug!("Retrying with original size: {}", alt);
            written = fetcher.fetch(&alt, &dest).await?;
        }
    }

    if written && dest.exists() {
        tracing::debug!("Downloaded: {}", dest.display());
        state.increment_downloaded(MediaKind::Photo);
        Ok(Some(MediaItem::on_disk(MediaKind::Photo, url, &dest)))
    } else {
        tracing::debug!("No image written for {}", url);
        state.increment_failed_media();
        Ok(None)
    }
}
