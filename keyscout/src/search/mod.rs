//! This module implements the concurrent keyword search pipeline.
//!
//! # Pipeline
//!
//! ```text
//! walker::enumerate_candidates ──► Vec<PathBuf> ──► engine (rayon pool)
//!        │ glob + smart filter                        │ one task per file
//!        ▼                                            ▼
//!   filters::should_skip_with               scanner::LineScanner::scan_file
//!                                                     │ first hit per line
//!                                                     ▼
//!                                           snippet::extract_snippet
//! ```
//!
//! Every file is read entirely outside any lock. When a worker finishes a
//! file it takes the engine's single aggregation lock exactly once to append
//! the file's matches, bump the completion counter and, if a second has
//! passed since the last notification, report progress:
//!
//! ```rust,ignore
//! files.par_iter().for_each(|path| {
//!     let outcome = scanner.scan_file(path);       // parallel I/O
//!     let mut guard = aggregate.lock();             // one entry per file
//!     guard.output.add_file_matches(outcome?);
//!     if let Some((done, total)) = guard.progress.record_completion(now) {
//!         observer.on_progress(done, total);
//!     }
//! });
//! ```
//!
//! # Ordering
//!
//! Matches land in the order workers finished their files, so two runs over
//! the same tree can list them differently. Set
//! [`ResultOrder::Path`](crate::config::ResultOrder::Path) for a stable order.
//!
//! # Failures
//!
//! A file that cannot be opened, read or decoded is handed to
//! [`SearchObserver::on_file_error`], contributes no matches, and still counts
//! as processed. Only configuration problems stop a search.

pub mod engine;
pub mod matcher;
pub mod progress;
pub mod scanner;
pub mod snippet;
pub mod walker;

pub use engine::{search, search_with_observer, SearchSession};
pub use matcher::KeywordMatcher;
pub use progress::{NoopObserver, ProgressState, SearchObserver};
pub use scanner::LineScanner;
pub use snippet::extract_snippet;
