//! Post source backed by the snscrape command-line tool.

use std::collections::VecDeque;
use std::ffi::OsString;
use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::process::{Child, ChildStdout, Command};
use tokio::task::JoinHandle;

use crate::error::{Error, Result};
use crate::source::jsonl::JsonlPostSource;
use crate::source::types::Post;
use crate::source::PostSource;

/// Number of stderr lines kept for error reporting.
const STDERR_TAIL_LINES: usize = 20;

/// Search query selecting an account's posts.
pub fn build_query(account: &str, since: Option<NaiveDate>) -> String {
    let mut query = format!("from:{}", account);
    if let Some(since) = since {
        query.push_str(&format!(" since:{}", since.format("%Y-%m-%d")));
    }
    query
}

/// Build the snscrape argument list.
fn build_args(account: &str, since: Option<NaiveDate>, limit: Option<u64>) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec!["--jsonl".into()];

    if let Some(limit) = limit {
        args.push("--max-results".into());
        args.push(limit.to_string().into());
    }

    args.push("twitter-search".into());
    args.push(build_query(account, since).into());
    args
}

/// Streams an account's posts out of a running snscrape process.
pub struct SnscrapeSource {
    child: Child,
    reader: JsonlPostSource<BufReader<ChildStdout>>,
    stderr_task: Option<JoinHandle<Vec<String>>>,
    finished: bool,
}

/// Log every stderr line and keep the last few for error reporting.
async fn stderr_tail<R: AsyncBufRead + Unpin>(reader: R) -> Vec<String> {
    let mut lines = reader.lines();
    let mut tail = VecDeque::with_capacity(STDERR_TAIL_LINES + 1);

    while let Ok(Some(line)) = lines.next_line().await {
        tracing::debug!("snscrape: {}", line);
        tail.push_back(line);
        if tail.len() > STDERR_TAIL_LINES {
            tail.pop_front();
        }
    }

    tail.into()
}

impl SnscrapeSource {
    /// Start snscrape for `account`.
    pub fn spawn(
        program: &Path,
        account: &str,
        since: Option<NaiveDate>,
        limit: Option<u64>,
    ) -> Result<Self> {
        let args = build_args(account, since, limit);

        tracing::debug!("Starting {} {:?}", program.display(), args);

        let mut child = Command::new(program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    Error::ToolNotFound(program.display().to_string())
                } else {
                    Error::Source(format!("Failed to start snscrape: {}", e))
                }
            })?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| Error::Source("Failed to capture snscrape stdout".into()))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| Error::Source("Failed to capture snscrape stderr".into()))?;

        // Drain stderr so the child never blocks on a full pipe
        let stderr_task = tokio::spawn(stderr_tail(BufReader::new(stderr)));

        Ok(Self {
            child,
            reader: JsonlPostSource::new(BufReader::new(stdout), account, limit),
            stderr_task: Some(stderr_task),
            finished: false,
        })
    }

    /// Reap the child once its output is exhausted.
    async fn finish(&mut self) -> Result<()> {
        self.finished = true;

        let status = self.child.wait().await?;
        let tail = match self.stderr_task.take() {
            Some(task) => task.await.unwrap_or_default(),
            None => Vec::new(),
        };

        if !status.success() {
            return Err(Error::Source(format!(
                "snscrape exited with {}: {}",
                status,
                tail.join("\n")
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl PostSource for SnscrapeSource {
    async fn next_post(&mut self) -> Result<Option<Post>> {
        if self.finished {
            return Ok(None);
        }

        match self.reader.next_post().await? {
            Some(post) => Ok(Some(post)),
            None => {
                // Limit reached: stop the child instead of reading the rest
                if self.reader.limit_reached() {
                    let _ = self.child.start_kill();
                    self.finished = true;
                    return Ok(None);
                }
                self.finish().await?;
                Ok(None)
            }
        }
    }
}
