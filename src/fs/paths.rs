//! Path and directory management.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::fs::naming::{image_filename, video_prefix, video_template};
use crate::media::MediaKind;

/// On-disk layout for one account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountPaths {
    pub base: PathBuf,
    pub images: PathBuf,
    pub videos: PathBuf,
    pub json: PathBuf,
    pub jsonl: PathBuf,
}

impl AccountPaths {
    /// Layout rooted at `<download_dir>/<account>`.
    pub fn new(download_dir: &Path, account: &str) -> Self {
        let base = download_dir.join(account);

        Self {
            images: base.join(MediaKind::Photo.folder_name()),
            videos: base.join(MediaKind::Video.folder_name()),
            json: base.join(format!("{}.json", account)),
            jsonl: base.join(format!("{}.jsonl", account)),
            base,
        }
    }

    /// Create the account, images and videos directories.
    pub fn ensure(&self) -> Result<()> {
        ensure_dir(&self.base)?;
        ensure_dir(&self.images)?;
        ensure_dir(&self.videos)?;
        Ok(())
    }

    /// Destination of a post's image.
    pub fn image_path(&self, post_id: u64, url: &str) -> PathBuf {
        self.images.join(image_filename(post_id, url))
    }

    /// yt-dlp output template for a post's videos.
    pub fn video_template(&self, post_id: u64) -> PathBuf {
        self.videos.join(video_template(post_id))
    }
}

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Find a previously downloaded video of a post (`<post-id>-*`).
///
/// Matches are ordered by name and the first one wins.
pub fn find_existing_video(videos_dir: &Path, post_id: u64) -> Result<Option<PathBuf>> {
    if !videos_dir.exists() {
        return Ok(None);
    }

    let prefix = video_prefix(post_id);
    let mut matches = Vec::new();

    for entry in std::fs::read_dir(videos_dir)? {
        let entry = entry?;
        let name = entry.file_name();

        if name.to_string_lossy().starts_with(&prefix) {
            matches.push(entry.path());
        }
    }

    matches.sort();
    Ok(matches.into_iter().next())
}
