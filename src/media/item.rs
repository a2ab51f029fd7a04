//! Media item representation.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Kind of media attached to a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Photo,
    Video,
    /// Animated image, delivered by the platform as a looping video.
    Gif,
}

impl MediaKind {
    /// Get the folder name for this media kind.
    pub fn folder_name(&self) -> &'static str {
        match self {
            MediaKind::Photo => "images",
            MediaKind::Video | MediaKind::Gif => "videos",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaKind::Photo => write!(f, "photo"),
            MediaKind::Video => write!(f, "video"),
            MediaKind::Gif => write!(f, "gif"),
        }
    }
}

/// A media item as stored in a post record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    #[serde(rename = "type")]
    pub kind: MediaKind,

    /// URL the item was fetched from.
    pub url: String,

    /// Where the file lives on disk.
    #[serde(default)]
    pub local_path: Option<String>,
}

impl MediaItem {
    /// Create an item for a file present on disk.
    pub fn on_disk(kind: MediaKind, url: impl Into<String>, path: &Path) -> Self {
        Self {
            kind,
            url: url.into(),
            local_path: Some(path.to_string_lossy().into_owned()),
        }
    }
}
