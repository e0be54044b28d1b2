use std::path::Path;
use std::time::{Duration, Instant};

use crate::errors::SearchError;

/// Minimum time between two progress notifications
pub const PROGRESS_INTERVAL: Duration = Duration::from_secs(1);

/// Receives out-of-band events while a search runs.
///
/// Both methods are called from worker threads. `on_progress` is called while
/// the engine holds its aggregation lock, so implementations should return
/// quickly and must not start another search.
pub trait SearchObserver: Sync {
    /// Called with the number of completed files and the total, at most once
    /// per [`PROGRESS_INTERVAL`] and at least once when there is any file.
    fn on_progress(&self, _processed: usize, _total: usize) {}

    /// Called once for every file that could not be scanned
    fn on_file_error(&self, _path: &Path, _error: &SearchError) {}
}

/// Observer that ignores every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl SearchObserver for NoopObserver {}

/// Completion counters for one search, with a time gate for notifications
#[derive(Debug, Clone)]
pub struct ProgressState {
    processed: usize,
    total: usize,
    last_emit: Option<Instant>,
}

impl ProgressState {
    pub fn new(total: usize) -> Self {
        Self {
            processed: 0,
            total,
            last_emit: None,
        }
    }

    pub fn processed(&self) -> usize {
        self.processed
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Counts one finished file. Returns the `(processed, total)` pair to
    /// report if a notification is due at `now`.
    pub fn record_completion(&mut self, now: Instant) -> Option<(usize, usize)> {
        self.processed += 1;
        debug_assert!(
            self.processed <= self.total,
            "processed {} of {} files",
            self.processed,
            self.total
        );

        let due = match self.last_emit {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= PROGRESS_INTERVAL,
        };
        if due {
            self.last_emit = Some(now);
            Some((self.processed, self.total))
        } else {
            None
        }
    }
}
