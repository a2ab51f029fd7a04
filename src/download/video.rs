//! Video and animated image download path.

use std::path::Path;

use crate::download::fetch::MediaFetcher;
use crate::download::state::DownloadState;
use crate::error::Result;
use crate::fs::find_existing_video;
use crate::media::{MediaItem, MediaKind};
use crate::source::Post;

/// Download a post's video or gif unless a file for the post already exists.
///
/// The fetcher is pointed at the post URL; the recorded item carries `kind`
/// and the file path.
pub async fn download_video(
    fetcher: &dyn MediaFetcher,
    state: &mut DownloadState,
    post: &Post,
    kind: MediaKind,
    cookies: Option<&Path>,
) -> Result<Option<MediaItem>> {
    if let Some(existing) = find_existing_video(&state.paths.videos, post.id)? {
        tracing::debug!("Skipping existing file: {}", existing.display());
        state.increment_skipped();
        return Ok(Some(MediaItem::on_disk(kind, &post.url, &existing)));
    }

    let template = state.paths.video_template(post.id);

    match fetcher.fetch(&post.url, &template, cookies).await {
        Some(path) => {
            tracing::debug!("Downloaded: {}", path.display());
            state.increment_downloaded(kind);
            Ok(Some(MediaItem::on_disk(kind, &post.url, &path)))
        }
        None => {
            tracing::debug!("No {} produced for {}", kind, post.url);
            state.increment_failed_media();
            Ok(None)
        }
    }
}
