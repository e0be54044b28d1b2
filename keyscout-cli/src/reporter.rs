use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use keyscout::{SearchError, SearchObserver};
use std::path::Path;

/// Draws search progress on stderr and prints per-file warnings above it
pub struct ProgressReporter {
    progress: ProgressBar,
}

impl ProgressReporter {
    pub fn new(hidden: bool) -> Self {
        let progress = if hidden {
            ProgressBar::hidden()
        } else {
            ProgressBar::new(0)
        };
        if let Ok(style) = ProgressStyle::default_bar()
            .template("Progress: {pos}/{len} ({percent}%) [{elapsed_precise}] {bar:40.cyan/blue}")
        {
            progress.set_style(style.progress_chars("=>-"));
        }
        Self { progress }
    }

    pub fn finish(&self) {
        self.progress.finish_and_clear();
    }
}

impl SearchObserver for ProgressReporter {
    fn on_progress(&self, processed: usize, total: usize) {
        self.progress.set_length(total as u64);
        self.progress.set_position(processed as u64);
    }

    fn on_file_error(&self, path: &Path, error: &SearchError) {
        let reason = match error {
            SearchError::FileNotFound(_) => "file not found".to_string(),
            SearchError::PermissionDenied(_) => "permission denied".to_string(),
            other => other.to_string(),
        };
        self.progress.suspend(|| {
            eprintln!(
                "{} Error reading file {}: {}",
                "warning:".yellow(),
                path.display(),
                reason
            );
        });
    }
}
