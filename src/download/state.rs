//! Download state tracking.

use std::fmt;

use crate::fs::AccountPaths;
use crate::media::MediaKind;
use crate::record::PostRecord;

/// Why the run loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StopReason {
    /// The source had no more posts or the limit was reached.
    #[default]
    Exhausted,
    /// The user interrupted the run.
    Interrupted,
    /// Too many posts failed in a row.
    ErrorThreshold,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::Exhausted => write!(f, "exhausted"),
            StopReason::Interrupted => write!(f, "interrupted"),
            StopReason::ErrorThreshold => write!(f, "error threshold reached"),
        }
    }
}

/// Per-account run state.
#[derive(Debug)]
pub struct DownloadState {
    pub account: String,
    pub paths: AccountPaths,

    /// Records in the order posts were yielded.
    pub records: Vec<PostRecord>,

    /// Posts failed since the last success.
    pub consecutive_errors: u32,

    pub stop_reason: StopReason,

    // Statistics
    pub pic_count: u64,
    pub vid_count: u64,
    pub gif_count: u64,
    pub skipped_count: u64,
    pub failed_media_count: u64,
    pub post_error_count: u64,
}

impl DownloadState {
    /// Create a new download state for an account.
    pub fn new(account: String, paths: AccountPaths) -> Self {
        Self {
            account,
            paths,
            records: Vec::new(),
            consecutive_errors: 0,
            stop_reason: StopReason::default(),
            pic_count: 0,
            vid_count: 0,
            gif_count: 0,
            skipped_count: 0,
            failed_media_count: 0,
            post_error_count: 0,
        }
    }

    /// Count a media file fetched during this run.
    pub fn increment_downloaded(&mut self, kind: MediaKind) {
        match kind {
            MediaKind::Photo => self.pic_count += 1,
            MediaKind::Video => self.vid_count += 1,
            MediaKind::Gif => self.gif_count += 1,
        }
    }

    /// Count a media file already on disk.
    pub fn increment_skipped(&mut self) {
        self.skipped_count += 1;
    }

    /// Count a media item that could not be fetched.
    pub fn increment_failed_media(&mut self) {
        self.failed_media_count += 1;
    }

    /// Append a finished record and clear the error streak.
    pub fn record_success(&mut self, record: PostRecord) {
        self.records.push(record);
        self.consecutive_errors = 0;
    }

    /// Count a failed post, returning the current streak.
    pub fn record_failure(&mut self) -> u32 {
        self.consecutive_errors += 1;
        self.post_error_count += 1;
        self.consecutive_errors
    }

    /// Get total downloaded count.
    pub fn total_downloaded(&self) -> u64 {
        self.pic_count + self.vid_count + self.gif_count
    }
}
