use glob::{MatchOptions, Pattern};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};

use crate::config::{normalize_pattern, SearchConfig};
use crate::errors::{SearchError, SearchResult};
use crate::filters::should_skip_with;

fn glob_options() -> MatchOptions {
    MatchOptions {
        case_sensitive: !cfg!(windows),
        require_literal_separator: false,
        require_literal_leading_dot: false,
    }
}

/// Lists every regular file under `root` whose file name matches `file_pattern`.
///
/// `*.*` selects every file, including names without an extension.
///
/// Hidden files and `.gitignore` rules get no special treatment, and symlinks
/// are not followed. Directories that cannot be read are logged and skipped.
pub fn enumerate(root: &Path, file_pattern: &str) -> SearchResult<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(SearchError::directory_not_found(root));
    }

    let file_pattern = normalize_pattern(file_pattern);
    let pattern = Pattern::new(file_pattern)
        .map_err(|e| SearchError::invalid_pattern(format!("{}: {}", file_pattern, e)))?;
    let options = glob_options();

    let mut builder = WalkBuilder::new(root);
    builder
        .standard_filters(false)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b));

    let mut files = Vec::new();
    for entry in builder.build() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        let matches_pattern = entry
            .file_name()
            .to_str()
            .is_some_and(|name| pattern.matches_with(name, options));
        if matches_pattern {
            trace!("Candidate file: {}", entry.path().display());
            files.push(entry.into_path());
        }
    }

    debug!(
        "Enumerated {} files matching '{}' under {}",
        files.len(),
        file_pattern,
        root.display()
    );
    Ok(files)
}

/// Enumerates the candidate files for a search, applying smart-search
/// filtering when enabled.
///
/// The filter sees each path relative to the root, so the location of the
/// root itself never causes a file to be skipped.
pub fn enumerate_candidates(config: &SearchConfig) -> SearchResult<Vec<PathBuf>> {
    let files = enumerate(&config.root_path, config.effective_pattern())?;
    if !config.smart_search {
        return Ok(files);
    }

    let before = files.len();
    let candidates: Vec<PathBuf> = files
        .into_iter()
        .filter(|path| {
            let relative = path.strip_prefix(&config.root_path).unwrap_or(path);
            !should_skip_with(relative, config.strict_directory_matching)
        })
        .collect();

    debug!(
        "Smart search kept {} of {} files",
        candidates.len(),
        before
    );
    Ok(candidates)
}
