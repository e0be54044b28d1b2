use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

/// One keyword occurrence
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Match {
    /// The file the line came from
    pub path: PathBuf,
    /// The line number where the match was found, starting at 1
    pub line_number: usize,
    /// Word-bounded excerpt of the line around the keyword
    pub snippet: String,
}

impl Match {
    pub fn new(path: impl Into<PathBuf>, line_number: usize, snippet: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            line_number,
            snippet: snippet.into(),
        }
    }
}

/// Everything a finished search produced.
///
/// `matches` is in the order workers completed their files unless a sort was
/// requested, so it is not reproducible across runs.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchOutput {
    /// All matches found
    pub matches: Vec<Match>,
    /// Number of candidate files dispatched to the scanner
    pub files_searched: usize,
    /// Number of files that could not be read
    pub files_failed: usize,
    /// Wall time of the whole search call
    #[serde(serialize_with = "serialize_seconds")]
    pub elapsed: Duration,
}

fn serialize_seconds<S: serde::Serializer>(elapsed: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(elapsed.as_secs_f64())
}

impl SearchOutput {
    /// Creates a new empty search output
    pub fn new() -> Self {
        Default::default()
    }

    /// Appends the matches of one completed file
    pub fn add_file_matches(&mut self, matches: Vec<Match>) {
        self.files_searched += 1;
        self.matches.extend(matches);
    }

    /// Records a completed file that could not be read
    pub fn add_failed_file(&mut self) {
        self.files_searched += 1;
        self.files_failed += 1;
    }

    pub fn total_matches(&self) -> usize {
        self.matches.len()
    }

    /// Number of distinct files with at least one match
    pub fn files_with_matches(&self) -> usize {
        let mut paths: Vec<&PathBuf> = self.matches.iter().map(|m| &m.path).collect();
        paths.sort();
        paths.dedup();
        paths.len()
    }

    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    /// Reorders matches by file path, then line number
    pub fn sort_by_location(&mut self) {
        self.matches.sort_by(|a, b| {
            a.path
                .cmp(&b.path)
                .then_with(|| a.line_number.cmp(&b.line_number))
        });
    }
}
