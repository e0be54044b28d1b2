use rayon::prelude::*;
use std::path::Path;
use std::sync::{Mutex, PoisonError};
use std::time::Instant;
use tracing::{debug, info};

use super::matcher::KeywordMatcher;
use super::progress::{NoopObserver, ProgressState, SearchObserver};
use super::scanner::LineScanner;
use super::walker::enumerate_candidates;
use crate::config::{ResultOrder, SearchConfig};
use crate::errors::{SearchError, SearchResult};
use crate::results::SearchOutput;

/// Shared state guarded by the single aggregation lock
struct Aggregate {
    output: SearchOutput,
    progress: ProgressState,
}

/// State of one search call: the clock and the configuration it runs with.
///
/// Nothing outlives [`SearchSession::run`]; two sessions never share state.
#[derive(Debug)]
pub struct SearchSession<'a> {
    config: &'a SearchConfig,
    started: Instant,
}

impl<'a> SearchSession<'a> {
    /// Starts the clock for a new search
    pub fn new(config: &'a SearchConfig) -> Self {
        Self {
            config,
            started: Instant::now(),
        }
    }

    pub fn config(&self) -> &SearchConfig {
        self.config
    }

    /// Validates the configuration, enumerates candidates and scans them in parallel
    pub fn run(self, observer: &dyn SearchObserver) -> SearchResult<SearchOutput> {
        let config = self.config;
        info!(
            "Starting search for '{}' in {}",
            config.keyword,
            config.root_path.display()
        );

        config.validate()?;
        let matcher = KeywordMatcher::new(&config.keyword, config.case_sensitive)?;
        let scanner = LineScanner::new(matcher, config.encoding_mode);

        let files = enumerate_candidates(config)?;
        let total = files.len();
        debug!("Dispatching {} files", total);

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.thread_count.get())
            .build()
            .map_err(|e| SearchError::config_error(format!("Failed to build thread pool: {}", e)))?;

        let aggregate = Mutex::new(Aggregate {
            output: SearchOutput::new(),
            progress: ProgressState::new(total),
        });

        pool.install(|| {
            files
                .par_iter()
                .for_each(|path| scan_and_record(&scanner, path, &aggregate, observer));
        });

        let Aggregate {
            mut output,
            progress,
        } = aggregate.into_inner().unwrap_or_else(PoisonError::into_inner);

        if progress.processed() != total || output.files_searched != total {
            return Err(SearchError::invariant_violation(format!(
                "processed {} files and recorded {} of {} dispatched",
                progress.processed(),
                output.files_searched,
                total
            )));
        }

        if config.result_order == ResultOrder::Path {
            output.sort_by_location();
        }
        output.elapsed = self.started.elapsed();

        info!(
            "Search complete. Found {} matches in {} of {} files ({} unreadable) in {:.2}s",
            output.total_matches(),
            output.files_with_matches(),
            output.files_searched,
            output.files_failed,
            output.elapsed_seconds()
        );

        Ok(output)
    }
}

/// Scans one file outside the lock, then records the outcome inside it
fn scan_and_record(
    scanner: &LineScanner,
    path: &Path,
    aggregate: &Mutex<Aggregate>,
    observer: &dyn SearchObserver,
) {
    let outcome = scanner.scan_file(path);
    if let Err(e) = &outcome {
        debug!("Error reading file {}: {}", path.display(), e);
        observer.on_file_error(path, e);
    }

    let mut guard = aggregate.lock().unwrap_or_else(PoisonError::into_inner);
    match outcome {
        Ok(matches) => guard.output.add_file_matches(matches),
        Err(_) => guard.output.add_failed_file(),
    }
    if let Some((processed, total)) = guard.progress.record_completion(Instant::now()) {
        observer.on_progress(processed, total);
    }
}

/// Performs a concurrent keyword search without progress or error callbacks
pub fn search(config: &SearchConfig) -> SearchResult<SearchOutput> {
    search_with_observer(config, &NoopObserver)
}

/// Performs a concurrent keyword search, reporting progress and per-file
/// errors to `observer`.
///
/// Matches come back in the order files finished, which differs between runs
/// unless `result_order` is [`ResultOrder::Path`].
pub fn search_with_observer(
    config: &SearchConfig,
    observer: &dyn SearchObserver,
) -> SearchResult<SearchOutput> {
    SearchSession::new(config).run(observer)
}
