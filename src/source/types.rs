//! Post types and the snscrape JSONL record format.

use chrono::{DateTime, FixedOffset};
use serde::Deserialize;

use crate::media::MediaKind;

/// A media reference attached to a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaRef {
    pub kind: MediaKind,
    pub url: String,
}

/// A post yielded by a post source.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: u64,
    /// Canonical `https://x.com/<account>/status/<id>` URL.
    pub url: String,
    pub date: DateTime<FixedOffset>,
    pub content: String,
    pub reply_count: u64,
    pub retweet_count: u64,
    pub like_count: u64,
    pub quote_count: u64,
    pub view_count: Option<u64>,
    pub media: Vec<MediaRef>,
}

/// Canonical URL of a post.
pub fn post_url(account: &str, id: u64) -> String {
    format!("https://x.com/{}/status/{}", account, id)
}

/// One tweet line of `snscrape --jsonl` output.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTweet {
    pub id: u64,
    pub date: DateTime<FixedOffset>,
    /// Current snscrape releases.
    #[serde(default)]
    pub raw_content: Option<String>,
    /// Older snscrape releases.
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub reply_count: Option<u64>,
    #[serde(default)]
    pub retweet_count: Option<u64>,
    #[serde(default)]
    pub like_count: Option<u64>,
    #[serde(default)]
    pub quote_count: Option<u64>,
    #[serde(default)]
    pub view_count: Option<u64>,
    #[serde(default)]
    pub media: Option<Vec<RawMedia>>,
}

/// A media entry, tagged by its snscrape class name.
#[derive(Debug, Deserialize)]
#[serde(tag = "_type")]
pub enum RawMedia {
    #[serde(rename = "snscrape.modules.twitter.Photo", rename_all = "camelCase")]
    Photo {
        #[serde(default)]
        full_url: Option<String>,
        #[serde(default)]
        preview_url: Option<String>,
        #[serde(default)]
        url: Option<String>,
    },
    #[serde(rename = "snscrape.modules.twitter.Video", rename_all = "camelCase")]
    Video {
        #[serde(default)]
        thumbnail_url: Option<String>,
        #[serde(default)]
        variants: Vec<RawVariant>,
    },
    #[serde(rename = "snscrape.modules.twitter.Gif", rename_all = "camelCase")]
    Gif {
        #[serde(default)]
        thumbnail_url: Option<String>,
        #[serde(default)]
        variants: Vec<RawVariant>,
    },
    #[serde(other)]
    Other,
}

/// A video rendition.
#[derive(Debug, Deserialize)]
pub struct RawVariant {
    pub url: String,
    #[serde(default)]
    pub bitrate: Option<u64>,
}

/// Highest-bitrate variant URL, falling back to the thumbnail.
fn best_variant_url(variants: Vec<RawVariant>, thumbnail_url: Option<String>) -> Option<String> {
    variants
        .into_iter()
        .max_by_key(|v| v.bitrate.unwrap_or(0))
        .map(|v| v.url)
        .or(thumbnail_url)
}

impl RawMedia {
    /// Convert to a media reference; unknown kinds and URL-less entries are dropped.
    pub fn into_media_ref(self) -> Option<MediaRef> {
        let (kind, url) = match self {
            RawMedia::Photo {
                full_url,
                preview_url,
                url,
            } => (MediaKind::Photo, full_url.or(preview_url).or(url)?),
            RawMedia::Video {
                thumbnail_url,
                variants,
            } => (MediaKind::Video, best_variant_url(variants, thumbnail_url)?),
            RawMedia::Gif {
                thumbnail_url,
                variants,
            } => (MediaKind::Gif, best_variant_url(variants, thumbnail_url)?),
            RawMedia::Other => return None,
        };

        Some(MediaRef { kind, url })
    }
}

impl RawTweet {
    /// Convert into a post of `account`.
    pub fn into_post(self, account: &str) -> Post {
        let media = self
            .media
            .unwrap_or_default()
            .into_iter()
            .filter_map(RawMedia::into_media_ref)
            .collect();

        Post {
            id: self.id,
            url: post_url(account, self.id),
            date: self.date,
            content: self.raw_content.or(self.content).unwrap_or_default(),
            reply_count: self.reply_count.unwrap_or(0),
            retweet_count: self.retweet_count.unwrap_or(0),
            like_count: self.like_count.unwrap_or(0),
            quote_count: self.quote_count.unwrap_or(0),
            view_count: self.view_count,
            media,
        }
    }
}
