//! Timeline download logic: the run loop over an account's posts.

use std::time::Duration;

use tokio::time::sleep;

use crate::config::Config;
use crate::download::fetch::Fetchers;
use crate::download::interrupt::Interrupt;
use crate::download::post::process_post;
use crate::download::state::{DownloadState, StopReason};
use crate::output::{create_post_counter, print_warning};
use crate::source::PostSource;

/// Process posts from `source` until it is exhausted, the user interrupts,
/// or too many posts fail in a row.
///
/// Records accumulate in `state.records`. A post whose processing was under
/// way when the interrupt arrived is discarded.
pub async fn download_timeline(
    source: &mut dyn PostSource,
    fetchers: &Fetchers<'_>,
    config: &Config,
    state: &mut DownloadState,
    interrupt: &Interrupt,
) -> StopReason {
    let post_delay = Duration::from_millis(config.options.post_delay_ms);
    let error_backoff = Duration::from_millis(config.options.error_backoff_ms);
    let threshold = config.options.max_consecutive_errors.max(1);

    let progress = create_post_counter(config.limit(), config.options.show_progress);

    tracing::info!("Downloading timeline for @{}...", state.account);

    let reason = loop {
        if interrupt.is_triggered() {
            break StopReason::Interrupted;
        }

        let result = match source.next_post().await {
            Ok(Some(post)) => process_post(fetchers, config, state, &post)
                .await
                .map(|record| (post.id, record)),
            Ok(None) => break StopReason::Exhausted,
            Err(e) => Err(e),
        };

        match result {
            Ok((post_id, record)) => {
                if interrupt.is_triggered() {
                    tracing::debug!("Discarding post {} after interrupt", post_id);
                    break StopReason::Interrupted;
                }

                state.record_success(record);
                progress.inc(1);

                // Gentle rate limit
                sleep(post_delay).await;
            }
            Err(e) => {
                let streak = state.record_failure();
                progress.inc(1);
                tracing::warn!("Post failed ({}/{} in a row): {}", streak, threshold, e);

                if streak >= threshold {
                    progress.suspend(|| {
                        print_warning(&format!(
                            "Too many consecutive errors ({}). Aborting.",
                            streak
                        ))
                    });
                    break StopReason::ErrorThreshold;
                }

                sleep(error_backoff).await;
            }
        }
    };

    progress.finish_and_clear();

    if reason == StopReason::Interrupted {
        print_warning("Interrupted by user. Saving progress...");
    }

    tracing::info!(
        "Timeline download complete: {} posts, {} pictures, {} videos, {} gifs",
        state.records.len(),
        state.pic_count,
        state.vid_count,
        state.gif_count
    );

    state.stop_reason = reason;
    reason
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::download::testing::{post, test_state, FakeImageFetcher, FakeMediaFetcher, FakeSource};
    use crate::error::Error;
    use crate::media::MediaKind;
    use crate::record::{read_json, read_jsonl, save_records};
    use crate::source::{JsonlPostSource, Post};

    fn quick_config() -> Config {
        let mut config = Config::default();
        config.options.post_delay_ms = 0;
        config.options.error_backoff_ms = 0;
        config.options.show_progress = false;
        config
    }

    fn failure() -> crate::error::Result<Post> {
        Err(Error::MalformedPost("boom".into()))
    }

    fn ids(state: &DownloadState) -> Vec<u64> {
        state.records.iter().map(|r| r.id).collect()
    }

    async fn run(
        source: &mut dyn PostSource,
        config: &Config,
        state: &mut DownloadState,
        interrupt: &Interrupt,
    ) -> (StopReason, FakeImageFetcher, FakeMediaFetcher) {
        let images = FakeImageFetcher::default();
        let videos = FakeMediaFetcher::default();
        let fetchers = Fetchers {
            images: &images,
            videos: &videos,
        };
        let reason = download_timeline(source, &fetchers, config, state, interrupt).await;
        (reason, images, videos)
    }

    #[tokio::test]
    async fn test_records_every_post_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = test_state(dir.path());
        let mut source = FakeSource::posts(vec![
            post(3, &[(MediaKind::Photo, "https://cdn.test/a.jpg")]),
            post(2, &[]),
            post(1, &[(MediaKind::Video, "https://video.twimg.com/v.mp4")]),
        ]);

        let (reason, _, _) = run(&mut source, &quick_config(), &mut state, &Interrupt::new()).await;

        assert_eq!(reason, StopReason::Exhausted);
        assert_eq!(state.stop_reason, StopReason::Exhausted);
        assert_eq!(ids(&state), vec![3, 2, 1]);
        assert_eq!(state.records[0].media.len(), 1);
        assert!(state.records[1].media.is_empty());
        assert_eq!(state.records[2].media[0].kind, MediaKind::Video);
    }

    #[tokio::test]
    async fn test_limit_keeps_first_n_posts() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = test_state(dir.path());
        let data: String = (1..=10)
            .rev()
            .map(|id| {
                format!(r#"{{"id": {id}, "date": "2024-05-01T10:00:00+00:00", "rawContent": "p"}}"#)
                    + "\n"
            })
            .collect();
        let mut source = JsonlPostSource::new(data.as_bytes(), "jack", Some(4));

        let (reason, _, _) = run(&mut source, &quick_config(), &mut state, &Interrupt::new()).await;

        assert_eq!(reason, StopReason::Exhausted);
        assert_eq!(ids(&state), vec![10, 9, 8, 7]);
    }

    #[tokio::test]
    async fn test_stops_after_exactly_k_consecutive_failures() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = test_state(dir.path());
        let mut config = quick_config();
        config.options.max_consecutive_errors = 3;

        let mut source = FakeSource::new(vec![
            Ok(post(1, &[])),
            Ok(post(2, &[])),
            failure(),
            failure(),
            failure(),
            Ok(post(6, &[])),
        ]);

        let (reason, _, _) = run(&mut source, &config, &mut state, &Interrupt::new()).await;

        assert_eq!(reason, StopReason::ErrorThreshold);
        assert_eq!(ids(&state), vec![1, 2]);
        assert_eq!(state.consecutive_errors, 3);
        assert_eq!(source.remaining(), 1);
    }

    #[tokio::test]
    async fn test_success_resets_failure_streak() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = test_state(dir.path());
        let mut config = quick_config();
        config.options.max_consecutive_errors = 2;

        let mut source = FakeSource::new(vec![
            failure(),
            Ok(post(2, &[])),
            failure(),
            Ok(post(4, &[])),
        ]);

        let (reason, _, _) = run(&mut source, &config, &mut state, &Interrupt::new()).await;

        assert_eq!(reason, StopReason::Exhausted);
        assert_eq!(ids(&state), vec![2, 4]);
        assert_eq!(state.post_error_count, 2);
        assert_eq!(state.consecutive_errors, 0);
    }

    #[tokio::test]
    async fn test_interrupt_discards_post_in_progress() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = test_state(dir.path());
        let interrupt = Interrupt::new();
        let mut source = FakeSource::posts((1..=6).map(|id| post(id, &[])).collect())
            .interrupt_on(4, interrupt.clone());

        let (reason, _, _) = run(&mut source, &quick_config(), &mut state, &interrupt).await;

        assert_eq!(reason, StopReason::Interrupted);
        assert_eq!(ids(&state), vec![1, 2, 3]);
        assert_eq!(source.remaining(), 2);
    }

    #[tokio::test]
    async fn test_interrupt_before_start() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = test_state(dir.path());
        let interrupt = Interrupt::new();
        interrupt.trigger();
        let mut source = FakeSource::posts(vec![post(1, &[])]);

        let (reason, _, _) = run(&mut source, &quick_config(), &mut state, &interrupt).await;

        assert_eq!(reason, StopReason::Interrupted);
        assert!(state.records.is_empty());
        assert_eq!(source.remaining(), 1);
    }

    #[tokio::test]
    async fn test_rerun_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let posts = vec![
            post(
                2,
                &[
                    (MediaKind::Photo, "https://cdn.test/a.jpg"),
                    (MediaKind::Photo, "https://cdn.test/b.jpg"),
                ],
            ),
            post(1, &[(MediaKind::Gif, "https://video.twimg.com/g.mp4")]),
        ];

        let mut first = test_state(dir.path());
        let (_, images, videos) = run(
            &mut FakeSource::posts(posts.clone()),
            &quick_config(),
            &mut first,
            &Interrupt::new(),
        )
        .await;
        assert_eq!(images.calls().len(), 2);
        assert_eq!(videos.calls().len(), 1);
        save_records(&first.paths, &first.records).unwrap();
        let json_before = std::fs::read_to_string(&first.paths.json).unwrap();
        let jsonl_before = std::fs::read_to_string(&first.paths.jsonl).unwrap();

        let mut second = test_state(dir.path());
        let (_, images, videos) = run(
            &mut FakeSource::posts(posts),
            &quick_config(),
            &mut second,
            &Interrupt::new(),
        )
        .await;
        assert!(images.calls().is_empty());
        assert!(videos.calls().is_empty());
        assert_eq!(second.skipped_count, 3);
        save_records(&second.paths, &second.records).unwrap();

        assert_eq!(std::fs::read_to_string(&second.paths.json).unwrap(), json_before);
        assert_eq!(std::fs::read_to_string(&second.paths.jsonl).unwrap(), jsonl_before);
        assert_eq!(
            read_json(&second.paths.json).unwrap(),
            read_jsonl(&second.paths.jsonl).unwrap()
        );
    }

    #[tokio::test]
    async fn test_processing_failures_reach_threshold() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = test_state(dir.path());
        let mut config = quick_config();
        config.options.max_consecutive_errors = 2;

        let mut source = FakeSource::posts(vec![
            post(1, &[]),
            post(2, &[(MediaKind::Photo, "https://cdn.test/a.jpg")]),
            post(3, &[(MediaKind::Photo, "https://cdn.test/b.jpg")]),
            post(4, &[(MediaKind::Photo, "https://cdn.test/c.jpg")]),
        ]);
        let images = FakeImageFetcher::erroring();
        let videos = FakeMediaFetcher::default();
        let fetchers = Fetchers {
            images: &images,
            videos: &videos,
        };

        let reason =
            download_timeline(&mut source, &fetchers, &config, &mut state, &Interrupt::new()).await;

        assert_eq!(reason, StopReason::ErrorThreshold);
        assert_eq!(ids(&state), vec![1]);
        assert_eq!(state.post_error_count, 2);
        assert_eq!(
            images.calls(),
            vec!["https://cdn.test/a.jpg", "https://cdn.test/b.jpg"]
        );
        assert_eq!(source.remaining(), 1);
    }
}
