use config::{Config as ConfigBuilder, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use crate::errors::{SearchError, SearchResult};

/// Order of matches in the final result list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultOrder {
    /// Order in which worker threads finished their files. Not stable across runs.
    #[default]
    Completion,
    /// Sorted by file path, then line number
    Path,
}

/// How to treat files that are not valid UTF-8
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncodingMode {
    /// Report the file to the error sink and skip it
    #[default]
    FailFast,
    /// Replace invalid sequences with U+FFFD and keep scanning
    Lossy,
}

/// Everything one search needs. Built once, then only read.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// The keyword to look for (literal, never a regex)
    pub keyword: String,

    /// Compare ordinally instead of ignoring case
    pub case_sensitive: bool,

    /// Root directory to start search from
    pub root_path: PathBuf,

    /// Glob applied to file names, e.g. "*", "*.*", "*.rs"
    pub file_pattern: String,

    /// Skip VCS/build/dependency directories and binary file extensions
    pub smart_search: bool,

    /// Match denylisted directory names against whole path components
    /// instead of anywhere in the path string
    pub strict_directory_matching: bool,

    /// Ordering applied to the final match list
    pub result_order: ResultOrder,

    /// Behavior for files containing invalid UTF-8
    pub encoding_mode: EncodingMode,

    /// Number of threads to use for scanning
    /// Defaults to number of CPU cores if not specified
    pub thread_count: NonZeroUsize,

    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

/// Maps the patterns that mean "every file" to `*`
pub(crate) fn normalize_pattern(pattern: &str) -> &str {
    match pattern.trim() {
        "" | "*.*" => "*",
        _ => pattern,
    }
}

fn default_thread_count() -> NonZeroUsize {
    NonZeroUsize::new(num_cpus::get()).unwrap_or(NonZeroUsize::MIN)
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            keyword: String::new(),
            case_sensitive: false,
            root_path: PathBuf::from("."),
            file_pattern: "*".to_string(),
            smart_search: true,
            strict_directory_matching: false,
            result_order: ResultOrder::default(),
            encoding_mode: EncodingMode::default(),
            thread_count: default_thread_count(),
            log_level: default_log_level(),
        }
    }
}

/// Values supplied on the command line. `None` leaves the file value alone.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub keyword: Option<String>,
    pub case_sensitive: Option<bool>,
    pub root_path: Option<PathBuf>,
    pub file_pattern: Option<String>,
    pub smart_search: Option<bool>,
    pub strict_directory_matching: Option<bool>,
    pub result_order: Option<ResultOrder>,
    pub encoding_mode: Option<EncodingMode>,
    pub thread_count: Option<NonZeroUsize>,
    pub log_level: Option<String>,
}

impl SearchConfig {
    /// Creates a config for `keyword` under `root_path` with every other option defaulted
    pub fn new(keyword: impl Into<String>, root_path: impl Into<PathBuf>) -> Self {
        Self {
            keyword: keyword.into(),
            root_path: root_path.into(),
            ..Self::default()
        }
    }

    /// Loads configuration from the default locations
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Loads configuration from a specific file
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        // Global and local files are optional, an explicit one is not
        let optional_files = [
            dirs::config_dir().map(|p| p.join("keyscout/config.yaml")),
            Some(PathBuf::from(".keyscout.yaml")),
        ];

        for path in optional_files.iter().flatten() {
            if path.exists() {
                builder = builder.add_source(File::from(path.as_path()));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path).required(true));
        }

        builder.build()?.try_deserialize()
    }

    /// Applies command line values on top of the loaded configuration
    pub fn merge_with_cli(mut self, cli: ConfigOverrides) -> Self {
        if let Some(keyword) = cli.keyword {
            self.keyword = keyword;
        }
        if let Some(case_sensitive) = cli.case_sensitive {
            self.case_sensitive = case_sensitive;
        }
        if let Some(root_path) = cli.root_path {
            self.root_path = root_path;
        }
        if let Some(file_pattern) = cli.file_pattern {
            self.file_pattern = file_pattern;
        }
        if let Some(smart_search) = cli.smart_search {
            self.smart_search = smart_search;
        }
        if let Some(strict) = cli.strict_directory_matching {
            self.strict_directory_matching = strict;
        }
        if let Some(order) = cli.result_order {
            self.result_order = order;
        }
        if let Some(mode) = cli.encoding_mode {
            self.encoding_mode = mode;
        }
        if let Some(threads) = cli.thread_count {
            self.thread_count = threads;
        }
        if let Some(level) = cli.log_level {
            self.log_level = level;
        }
        self
    }

    /// Checks the inputs that must hold before any directory is walked
    pub fn validate(&self) -> SearchResult<()> {
        if self.keyword.is_empty() {
            return Err(SearchError::EmptyKeyword);
        }
        if !self.root_path.is_dir() {
            return Err(SearchError::directory_not_found(&self.root_path));
        }
        glob::Pattern::new(self.effective_pattern())
            .map_err(|e| SearchError::invalid_pattern(format!("{}: {}", self.file_pattern, e)))?;
        Ok(())
    }

    /// The file glob as matched against file names. An empty pattern and
    /// `*.*` both select every file, extensionless names included.
    pub fn effective_pattern(&self) -> &str {
        normalize_pattern(&self.file_pattern)
    }
}
