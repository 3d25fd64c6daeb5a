use crate::extractor::ConcatProgress;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::time::Duration;

pub struct ProgressManager {
    multi_progress: MultiProgress,
    enabled: bool,
}

impl ProgressManager {
    pub fn new(enabled: bool) -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            enabled,
        }
    }

    /// Length is reset at the start of each phase.
    pub fn create_file_progress(&self) -> ProgressBar {
        if !self.enabled {
            return ProgressBar::hidden();
        }

        let pb = self.multi_progress.add(ProgressBar::new(0));
        pb.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos:>7}/{len:7} files {msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
        );
        pb.set_message("Listing directory...");
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }

    pub fn clear(&self) {
        if self.enabled {
            self.multi_progress.clear().ok();
        }
    }
}

pub fn update_file_progress(pb: &ProgressBar, progress: &ConcatProgress, labels: &[String]) {
    let label = labels
        .get(progress.phase)
        .map(String::as_str)
        .unwrap_or("files");

    if pb.length() != Some(progress.files_in_phase as u64) {
        pb.set_length(progress.files_in_phase as u64);
    }
    pb.set_position(progress.files_processed as u64);

    match progress.current_file {
        Some(ref current_file) => pb.set_message(format!("{} {}", label, current_file)),
        None => pb.set_message(format!("Collecting {}", label)),
    }
}

pub fn finish_progress_with_summary(pb: &ProgressBar, message: &str, duration: Duration) {
    let final_message = format!("{} (completed in {})", message, format_duration(duration));
    pb.finish_with_message(final_message);
}

pub(crate) fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs >= 60 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else if secs > 0 {
        format!("{}s", secs)
    } else {
        format!("{}ms", duration.as_millis())
    }
}
