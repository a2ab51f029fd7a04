//! Post source module.
//!
//! This module provides:
//! - The `PostSource` interface the run controller pulls posts from
//! - Post and media reference types
//! - A JSONL reader for snscrape records
//! - A source driving the snscrape command-line tool

pub mod jsonl;
pub mod snscrape;
pub mod types;

use async_trait::async_trait;

use crate::error::Result;

pub use jsonl::JsonlPostSource;
pub use snscrape::{build_query, SnscrapeSource};
pub use types::{post_url, MediaRef, Post};

/// A lazy, time-ordered sequence of an account's posts.
///
/// Date filtering and the post-count limit are applied by the source.
#[async_trait]
pub trait PostSource: Send {
    /// Next post, or `None` once the sequence is exhausted.
    ///
    /// An error concerns a single item; callers may keep pulling.
    async fn next_post(&mut self) -> Result<Option<Post>>;
}
