//! Post source reading snscrape JSONL from any async reader.

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

use crate::error::{Error, Result};
use crate::source::types::{Post, RawTweet};
use crate::source::PostSource;

/// Yields posts from line-delimited snscrape records, capped at `limit`.
pub struct JsonlPostSource<R> {
    lines: Lines<R>,
    account: String,
    limit: Option<u64>,
    yielded: u64,
}

impl<R: AsyncBufRead + Unpin + Send> JsonlPostSource<R> {
    pub fn new(reader: R, account: impl Into<String>, limit: Option<u64>) -> Self {
        Self {
            lines: reader.lines(),
            account: account.into(),
            limit,
            yielded: 0,
        }
    }

    /// Number of posts handed out so far.
    pub fn yielded(&self) -> u64 {
        self.yielded
    }

    /// Read the next non-blank line, `None` at end of input.
    async fn next_line(&mut self) -> Result<Option<String>> {
        while let Some(line) = self.lines.next_line().await? {
            if !line.trim().is_empty() {
                return Ok(Some(line));
            }
        }
        Ok(None)
    }

    /// Whether the post limit has been handed out.
    pub fn limit_reached(&self) -> bool {
        self.limit.is_some_and(|limit| self.yielded >= limit)
    }

    fn parse(&mut self, line: &str) -> Result<Post> {
        let raw: RawTweet =
            serde_json::from_str(line).map_err(|e| Error::MalformedPost(e.to_string()))?;
        self.yielded += 1;
        Ok(raw.into_post(&self.account))
    }
}

#[async_trait]
impl<R: AsyncBufRead + Unpin + Send> PostSource for JsonlPostSource<R> {
    async fn next_post(&mut self) -> Result<Option<Post>> {
        if self.limit_reached() {
            return Ok(None);
        }

        match self.next_line().await? {
            Some(line) => self.parse(&line).map(Some),
            None => Ok(None),
        }
    }
}
