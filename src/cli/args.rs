//! Command-line argument definitions using clap.

use clap::Parser;
use std::path::PathBuf;

use crate::config::Config;

/// Account archiver CLI.
#[derive(Parser, Debug)]
#[command(
    name = "x-media-archiver",
    version,
    about = "Archive the posts and media of an X account",
    long_about = "A CLI tool to archive an X (Twitter) account's posts together with their photos, \
                  videos and animated gifs.\n\n\
                  Posts are listed through snscrape, images are fetched directly and videos are \
                  handed to yt-dlp. Files already on disk are never fetched again."
)]
pub struct Args {
    /// Account to archive: `name`, `@name` or a profile URL.
    /// Prompted for on the terminal when omitted.
    #[arg(short, long)]
    pub user: Option<String>,

    /// Maximum number of posts to process (0 = no limit).
    #[arg(short, long)]
    pub limit: Option<u64>,

    /// Only posts since this date (YYYY-MM-DD).
    #[arg(long)]
    pub since: Option<String>,

    /// Netscape cookie file handed to yt-dlp.
    #[arg(long)]
    pub cookies: Option<PathBuf>,

    /// Stop after this many consecutive failed posts.
    #[arg(long = "max-consec-errors")]
    pub max_consecutive_errors: Option<u32>,

    /// Base directory for downloads.
    #[arg(short = 'd', long = "directory")]
    pub download_directory: Option<PathBuf>,

    /// Path to configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Hide the progress indicator.
    #[arg(long, short)]
    pub quiet: bool,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,
}

impl Args {
    /// Merge CLI arguments into an existing config, overriding where specified.
    pub fn merge_into_config(self, config: &mut Config) {
        if let Some(user) = self.user {
            config.target.account = Some(user);
        }

        if let Some(limit) = self.limit {
            config.target.limit = limit;
        }

        if let Some(since) = self.since {
            config.target.since = Some(since);
        }

        if let Some(cookies) = self.cookies {
            config.video.cookies_file = Some(cookies);
        }

        if let Some(max) = self.max_consecutive_errors {
            config.options.max_consecutive_errors = max;
        }

        if let Some(dir) = self.download_directory {
            config.options.download_directory = dir;
        }

        // Only override if set to non-default
        if self.quiet {
            config.options.show_progress = false;
        }
    }
}
