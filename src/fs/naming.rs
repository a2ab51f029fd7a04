//! Filename generation and manipulation.

use std::sync::LazyLock;

use regex::Regex;

/// Default maximum filename length, in characters.
pub const MAX_FILENAME_LENGTH: usize = 150;

static FORBIDDEN_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"[\\/:*?"<>|]+"#).unwrap());

/// Make a string safe to use as a single path segment.
///
/// Every run of `\ / : * ? " < > |` becomes one underscore and the result is
/// cut to `max_len` characters.
pub fn sanitize_filename(name: &str, max_len: usize) -> String {
    let sanitized = FORBIDDEN_RUNS.replace_all(name, "_");

    match sanitized.char_indices().nth(max_len) {
        Some((cut, _)) => sanitized[..cut].to_string(),
        None => sanitized.into_owned(),
    }
}

/// Last path segment of a URL, query string included.
pub fn url_basename(url: &str) -> &str {
    let trimmed = url.trim_end_matches('/');
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}

/// Filename for a post's image: `<post-id>_<basename-of-url>`, sanitized.
pub fn image_filename(post_id: u64, url: &str) -> String {
    sanitize_filename(
        &format!("{}_{}", post_id, url_basename(url)),
        MAX_FILENAME_LENGTH,
    )
}

/// Prefix shared by every video file of a post.
pub fn video_prefix(post_id: u64) -> String {
    format!("{}-", post_id)
}

/// yt-dlp output template for a post's videos.
pub fn video_template(post_id: u64) -> String {
    format!("{}%(id)s.%(ext)s", video_prefix(post_id))
}
