//! Configuration structures and loading logic.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Browser user agent sent with every outbound request.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/123.0.0.0 Safari/537.36";

/// Referer sent with image requests.
pub const DEFAULT_REFERER: &str = "https://x.com";

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub target: TargetConfig,

    #[serde(default)]
    pub options: OptionsConfig,

    #[serde(default)]
    pub network: NetworkConfig,

    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub video: VideoConfig,
}

/// Which account to archive and how much of it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TargetConfig {
    /// Account name without the leading `@`.
    #[serde(default)]
    pub account: Option<String>,

    /// Maximum number of posts to process (0 = no limit).
    #[serde(default)]
    pub limit: u64,

    /// Only posts since this date (YYYY-MM-DD).
    #[serde(default)]
    pub since: Option<String>,
}

/// Run loop options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionsConfig {
    /// Root directory that holds one folder per account.
    #[serde(default = "default_download_directory")]
    pub download_directory: PathBuf,

    /// Stop after this many consecutive post failures.
    #[serde(default = "default_max_consecutive_errors")]
    pub max_consecutive_errors: u32,

    /// Pause after each successfully processed post.
    #[serde(default = "default_post_delay_ms")]
    pub post_delay_ms: u64,

    /// Pause after a failed post.
    #[serde(default = "default_error_backoff_ms")]
    pub error_backoff_ms: u64,

    /// Whether to show the progress indicator.
    #[serde(default = "default_true")]
    pub show_progress: bool,
}

impl Default for OptionsConfig {
    fn default() -> Self {
        Self {
            download_directory: default_download_directory(),
            max_consecutive_errors: default_max_consecutive_errors(),
            post_delay_ms: default_post_delay_ms(),
            error_backoff_ms: default_error_backoff_ms(),
            show_progress: true,
        }
    }
}

/// HTTP settings for direct image downloads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Browser user agent string.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Referer header for image requests.
    #[serde(default = "default_referer")]
    pub referer: String,

    /// Per-request timeout for image downloads.
    #[serde(default = "default_image_timeout")]
    pub image_timeout_seconds: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            referer: default_referer(),
            image_timeout_seconds: default_image_timeout(),
        }
    }
}

/// Post source settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Path or name of the snscrape executable.
    #[serde(default = "default_snscrape_path")]
    pub snscrape_path: PathBuf,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            snscrape_path: default_snscrape_path(),
        }
    }
}

/// Video and animated image fetcher settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoConfig {
    /// Path or name of the yt-dlp executable.
    #[serde(default = "default_ytdlp_path")]
    pub ytdlp_path: PathBuf,

    /// Retries yt-dlp performs on its own.
    #[serde(default = "default_retries")]
    pub retries: u32,

    /// Parallel fragment downloads per video.
    #[serde(default = "default_concurrent_fragments")]
    pub concurrent_fragments: u32,

    /// Container used when yt-dlp merges streams.
    #[serde(default = "default_merge_output_format")]
    pub merge_output_format: String,

    /// Netscape cookies file for restricted media.
    #[serde(default)]
    pub cookies_file: Option<PathBuf>,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            ytdlp_path: default_ytdlp_path(),
            retries: default_retries(),
            concurrent_fragments: default_concurrent_fragments(),
            merge_output_format: default_merge_output_format(),
            cookies_file: None,
        }
    }
}

fn default_download_directory() -> PathBuf {
    PathBuf::from("downloads")
}

fn default_max_consecutive_errors() -> u32 {
    50
}

fn default_post_delay_ms() -> u64 {
    200
}

fn default_error_backoff_ms() -> u64 {
    1000
}

fn default_true() -> bool {
    true
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_referer() -> String {
    DEFAULT_REFERER.to_string()
}

fn default_image_timeout() -> u64 {
    30
}

fn default_snscrape_path() -> PathBuf {
    PathBuf::from("snscrape")
}

fn default_ytdlp_path() -> PathBuf {
    PathBuf::from("yt-dlp")
}

fn default_retries() -> u32 {
    10
}

fn default_concurrent_fragments() -> u32 {
    3
}

fn default_merge_output_format() -> String {
    "mp4".to_string()
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Config(format!("Configuration file not found: {}", path.display()))
            } else {
                Error::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Post-count limit, `None` when unbounded.
    pub fn limit(&self) -> Option<u64> {
        match self.target.limit {
            0 => None,
            n => Some(n),
        }
    }
}
