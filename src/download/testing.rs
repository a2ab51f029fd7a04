//! Fakes shared by the download tests.

use std::collections::{HashSet, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::DateTime;

use crate::download::fetch::{ImageFetcher, MediaFetcher};
use crate::download::interrupt::Interrupt;
use crate::download::state::DownloadState;
use crate::error::{Error, Result};
use crate::fs::AccountPaths;
use crate::media::MediaKind;
use crate::source::{post_url, MediaRef, Post, PostSource};

/// Fresh state for account `jack` under `root`, directories created.
pub fn test_state(root: &Path) -> DownloadState {
    let paths = AccountPaths::new(root, "jack");
    paths.ensure().unwrap();
    DownloadState::new("jack".into(), paths)
}

/// A post of `jack` with the given media.
pub fn post(id: u64, media: &[(MediaKind, &str)]) -> Post {
    Post {
        id,
        url: post_url("jack", id),
        date: DateTime::parse_from_rfc3339("2024-05-01T10:00:00+00:00").unwrap(),
        content: format!("post {id}"),
        reply_count: 1,
        retweet_count: 2,
        like_count: 3,
        quote_count: 4,
        view_count: Some(50),
        media: media
            .iter()
            .map(|(kind, url)| MediaRef {
                kind: *kind,
                url: url.to_string(),
            })
            .collect(),
    }
}

#[derive(Default)]
enum ImageMode {
    #[default]
    Succeed,
    FailUrls(HashSet<String>),
    Error,
}

/// Image fetcher writing a small file for every URL not told to fail.
#[derive(Default)]
pub struct FakeImageFetcher {
    mode: ImageMode,
    calls: Mutex<Vec<String>>,
}

impl FakeImageFetcher {
    /// Answer non-success for these URLs.
    pub fn failing(urls: &[&str]) -> Self {
        Self {
            mode: ImageMode::FailUrls(urls.iter().map(|u| u.to_string()).collect()),
            calls: Mutex::default(),
        }
    }

    /// Fail every request with a transport error.
    pub fn erroring() -> Self {
        Self {
            mode: ImageMode::Error,
            calls: Mutex::default(),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageFetcher for FakeImageFetcher {
    async fn fetch(&self, url: &str, dest: &Path) -> Result<bool> {
        self.calls.lock().unwrap().push(url.to_string());

        match &self.mode {
            ImageMode::Error => Err(Error::Download("connection reset".into())),
            ImageMode::FailUrls(urls) if urls.contains(url) => Ok(false),
            _ => {
                std::fs::write(dest, url.as_bytes())?;
                Ok(true)
            }
        }
    }
}

/// Media fetcher expanding the template into a file, or producing nothing.
#[derive(Default)]
pub struct FakeMediaFetcher {
    fail: bool,
    calls: Mutex<Vec<(String, PathBuf, Option<PathBuf>)>>,
}

impl FakeMediaFetcher {
    pub fn failing() -> Self {
        Self {
            fail: true,
            calls: Mutex::default(),
        }
    }

    pub fn calls(&self) -> Vec<(String, PathBuf, Option<PathBuf>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl MediaFetcher for FakeMediaFetcher {
    async fn fetch(
        &self,
        url: &str,
        output_template: &Path,
        cookies: Option<&Path>,
    ) -> Option<PathBuf> {
        self.calls.lock().unwrap().push((
            url.to_string(),
            output_template.to_path_buf(),
            cookies.map(Path::to_path_buf),
        ));

        if self.fail {
            return None;
        }

        let media_id = url.rsplit('/').next().unwrap_or("0");
        let path = PathBuf::from(
            output_template
                .to_string_lossy()
                .replace("%(id)s", media_id)
                .replace("%(ext)s", "mp4"),
        );
        std::fs::write(&path, b"video").ok()?;
        Some(path)
    }
}

/// Scripted post source.
pub struct FakeSource {
    items: VecDeque<Result<Post>>,
    yielded: usize,
    interrupt_on: Option<(usize, Interrupt)>,
}

impl FakeSource {
    pub fn new(items: Vec<Result<Post>>) -> Self {
        Self {
            items: items.into(),
            yielded: 0,
            interrupt_on: None,
        }
    }

    pub fn posts(posts: Vec<Post>) -> Self {
        Self::new(posts.into_iter().map(Ok).collect())
    }

    /// Raise `interrupt` while the `m`-th item (1-based) is being handed out.
    pub fn interrupt_on(mut self, m: usize, interrupt: Interrupt) -> Self {
        self.interrupt_on = Some((m, interrupt));
        self
    }

    pub fn remaining(&self) -> usize {
        self.items.len()
    }
}

#[async_trait]
impl PostSource for FakeSource {
    async fn next_post(&mut self) -> Result<Option<Post>> {
        let Some(item) = self.items.pop_front() else {
            return Ok(None);
        };

        self.yielded += 1;
        if let Some((m, interrupt)) = &self.interrupt_on {
            if *m == self.yielded {
                interrupt.trigger();
            }
        }

        item.map(Some)
    }
}
