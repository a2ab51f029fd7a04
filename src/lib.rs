//! X Media Archiver - archive an X account's posts and media locally.
//!
//! The crate pulls an account's posts from a `PostSource`, downloads each
//! post's photos over HTTP and its videos and gifs through yt-dlp, and writes
//! one record per post to `<account>.json` and `<account>.jsonl`.
//!
//! # Features
//!
//! - Post listing through snscrape with date and count filters
//! - Direct image downloads with an original-size retry
//! - Video and gif downloads through yt-dlp, with optional cookies
//! - Idempotent reruns: files already on disk are skipped
//! - Consecutive-error budget and graceful interrupt handling
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use x_media_archiver::download::{Fetchers, HttpImageFetcher, Interrupt, YtDlpFetcher};
//! use x_media_archiver::{download_timeline, save_records, AccountPaths, Config, DownloadState, SnscrapeSource};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load(Path::new("config.toml"))?;
//!     let paths = AccountPaths::new(&config.options.download_directory, "jack");
//!     paths.ensure()?;
//!
//!     let images = HttpImageFetcher::new(&config.network)?;
//!     let videos = YtDlpFetcher::new(&config.video, &config.network.user_agent);
//!     let fetchers = Fetchers { images: &images, videos: &videos };
//!
//!     let mut source = SnscrapeSource::spawn(&config.source.snscrape_path, "jack", None, config.limit())?;
//!     let mut state = DownloadState::new("jack".to_string(), paths);
//!     download_timeline(&mut source, &fetchers, &config, &mut state, &Interrupt::listen()).await;
//!
//!     save_records(&state.paths, &state.records)?;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod fs;
pub mod media;
pub mod output;
pub mod record;
pub mod source;

// Re-exports for convenience
pub use config::Config;
pub use download::{download_timeline, DownloadState, StopReason};
pub use error::{Error, Result};
pub use fs::AccountPaths;
pub use media::{MediaItem, MediaKind};
pub use record::{save_records, PostRecord};
pub use source::{Post, PostSource, SnscrapeSource};
