//! Download module for post media.
//!
//! This module provides:
//! - Download state tracking
//! - Timeline downloading (the run loop)
//! - Per-post media processing
//! - Image fetching over HTTP
//! - Video and gif fetching through yt-dlp
//! - Interrupt handling

pub mod fetch;
pub mod http;
pub mod image;
pub mod interrupt;
pub mod post;
pub mod state;
pub mod timeline;
pub mod video;
pub mod ytdlp;

#[cfg(test)]
pub(crate) mod testing;

pub use fetch::{Fetchers, ImageFetcher, MediaFetcher};
pub use http::HttpImageFetcher;
pub use interrupt::Interrupt;
pub use post::process_post;
pub use state::{DownloadState, StopReason};
pub use timeline::download_timeline;
pub use ytdlp::YtDlpFetcher;
