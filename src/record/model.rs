//! Persisted post record.

use serde::{Deserialize, Serialize};

use crate::media::MediaItem;
use crate::source::Post;

/// A post together with the media that reached the disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRecord {
    pub id: u64,
    pub url: String,
    /// ISO-8601 timestamp with offset.
    pub date: String,
    pub content: String,
    pub reply_count: u64,
    pub retweet_count: u64,
    pub like_count: u64,
    pub quote_count: u64,
    #[serde(default)]
    pub view_count: Option<u64>,
    #[serde(default)]
    pub media: Vec<MediaItem>,
}

impl PostRecord {
    /// Record for `post` with no media yet.
    pub fn from_post(post: &Post) -> Self {
        Self {
            id: post.id,
            url: post.url.clone(),
            date: post.date.to_rfc3339(),
            content: post.content.clone(),
            reply_count: post.reply_count,
            retweet_count: post.retweet_count,
            like_count: post.like_count,
            quote_count: post.quote_count,
            view_count: post.view_count,
            media: Vec::new(),
        }
    }
}
