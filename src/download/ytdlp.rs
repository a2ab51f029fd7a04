//! Video and animated image downloading via yt-dlp.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::config::VideoConfig;
use crate::download::fetch::MediaFetcher;

/// Media fetcher that shells out to yt-dlp.
#[derive(Debug, Clone)]
pub struct YtDlpFetcher {
    program: PathBuf,
    user_agent: String,
    retries: u32,
    concurrent_fragments: u32,
    merge_output_format: String,
}

impl YtDlpFetcher {
    pub fn new(config: &VideoConfig, user_agent: &str) -> Self {
        Self {
            program: config.ytdlp_path.clone(),
            user_agent: user_agent.to_string(),
            retries: config.retries,
            concurrent_fragments: config.concurrent_fragments,
            merge_output_format: config.merge_output_format.clone(),
        }
    }

    /// Check that the yt-dlp executable can be started.
    pub async fn is_available(&self) -> bool {
        Command::new(&self.program)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map(|s| s.success())
            .unwrap_or(false)
    }

    /// Build the yt-dlp argument list.
    fn build_args(
        &self,
        url: &str,
        output_template: &Path,
        cookies: Option<&Path>,
    ) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "--no-warnings".into(),
            "--no-progress".into(),
            "--ignore-errors".into(),
            "--retries".into(),
            self.retries.to_string().into(),
            "--concurrent-fragments".into(),
            self.concurrent_fragments.to_string().into(),
            "--add-header".into(),
            format!("User-Agent:{}", self.user_agent).into(),
            "--merge-output-format".into(),
            self.merge_output_format.clone().into(),
            "--output".into(),
            output_template.as_os_str().to_os_string(),
            // Report the final path once post-processing has moved the file
            "--print".into(),
            "after_move:filepath".into(),
        ];

        if let Some(cookies_path) = cookies {
            if !cookies_path.exists() {
                tracing::warn!(
                    "Cookies file {} does not exist, continuing without cookies",
                    cookies_path.display()
                );
            } else if cookies_path.is_dir() {
                tracing::warn!(
                    "Cookies path {} is a directory, continuing without cookies",
                    cookies_path.display()
                );
            } else {
                args.push("--cookies".into());
                args.push(cookies_path.as_os_str().to_os_string());
            }
        }

        // URL goes last
        args.push(url.into());
        args
    }
}

/// Pick the first reported file path out of yt-dlp's stdout.
fn parse_final_path(stdout: &str) -> Option<PathBuf> {
    stdout
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(PathBuf::from)
}

#[async_trait]
impl MediaFetcher for YtDlpFetcher {
    async fn fetch(
        &self,
        url: &str,
        output_template: &Path,
        cookies: Option<&Path>,
    ) -> Option<PathBuf> {
        let args = self.build_args(url, output_template, cookies);

        tracing::debug!("Running yt-dlp for {}", url);

        let output = match Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
        {
            Ok(output) => output,
            Err(e) => {
                if e.kind() == std::io::ErrorKind::NotFound {
                    tracing::warn!("yt-dlp not found at {}", self.program.display());
                } else {
                    tracing::warn!("Failed to run yt-dlp: {}", e);
                }
                return None;
            }
        };

        // --ignore-errors lets a partially successful run still report files
        let path = parse_final_path(&String::from_utf8_lossy(&output.stdout));

        if path.is_none() {
            tracing::debug!(
                "yt-dlp produced no file for {} ({}): {}",
                url,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        path
    }
}
