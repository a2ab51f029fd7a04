//! Statistics reporting.

use console::style;

use crate::download::{DownloadState, StopReason};

/// Print statistics for the finished run.
pub fn print_account_stats(state: &DownloadState) {
    println!();
    println!(
        "{}",
        style(format!("Statistics for @{}:", state.account)).bold()
    );
    println!("  Posts:    {}", state.records.len());
    println!("  Pictures: {}", state.pic_count);
    println!("  Videos:   {}", state.vid_count);
    println!("  Gifs:     {}", state.gif_count);
    println!("  Skipped:  {} (already on disk)", state.skipped_count);
    if state.failed_media_count > 0 {
        println!("  Failed:   {} media", style(state.failed_media_count).red());
    }
    if state.post_error_count > 0 {
        println!("  Errors:   {} posts", style(state.post_error_count).red());
    }
    println!("  Total:    {} downloaded", state.total_downloaded());

    if state.stop_reason != StopReason::Exhausted {
        println!("  Stopped:  {}", style(state.stop_reason).yellow());
    }
}
