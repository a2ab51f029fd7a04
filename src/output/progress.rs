//! Progress bar utilities.

use indicatif::{ProgressBar, ProgressStyle};

/// Create a counter of processed posts.
///
/// A bar when the total is known, a spinner otherwise; hidden when not `visible`.
pub fn create_post_counter(limit: Option<u64>, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let bar = match limit {
        Some(total) => {
            let bar = ProgressBar::new(total);
            bar.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} posts ({elapsed})")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("#>-"),
            );
            bar
        }
        None => {
            let spinner = ProgressBar::new_spinner();
            spinner.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} {pos} posts ({elapsed}) {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            spinner
        }
    };

    bar.enable_steady_tick(std::time::Duration::from_millis(100));
    bar
}
