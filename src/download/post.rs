//! Single post processing.

use crate::config::Config;
use crate::download::fetch::Fetchers;
use crate::download::image::download_image;
use crate::download::state::DownloadState;
use crate::download::video::download_video;
use crate::error::Result;
use crate::media::MediaKind;
use crate::record::PostRecord;
use crate::source::Post;

/// Fetch a post's media and build its record.
///
/// Media that could not be fetched is left out of the record. Transport and
/// filesystem errors fail the whole post.
pub async fn process_post(
    fetchers: &Fetchers<'_>,
    config: &Config,
    state: &mut DownloadState,
    post: &Post,
) -> Result<PostRecord> {
    let mut record = PostRecord::from_post(post);
    let cookies = config.video.cookies_file.as_deref();

    for media in &post.media {
        let item = match media.kind {
            MediaKind::Photo => download_image(fetchers.images, state, post.id, &media.url).await?,
            MediaKind::Video | MediaKind::Gif => {
                download_video(fetchers.videos, state, post, media.kind, cookies).await?
            }
        };

        if let Some(item) = item {
            record.media.push(item);
        }
    }

    Ok(record)
}
