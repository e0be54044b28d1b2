/// This module defines the error types for keyscout.
///
/// Errors fall into three categories, and callers treat each one differently:
///
/// 1. **Configuration errors** are fatal and surface before any file is opened:
///    an empty keyword, a root directory that does not exist, or a file glob
///    that cannot be parsed.
///
/// 2. **File access errors** are local to a single file. The search engine
///    hands them to the caller's error sink, the file contributes zero matches,
///    and the search keeps going.
///
/// 3. **Internal invariant errors** indicate a defect in the engine itself
///    (for example, more completions than dispatched files).
///
/// ```rust,ignore
/// match keyscout::search(&config) {
///     Ok(output) => render(output),
///     Err(e) if e.category() == ErrorCategory::Configuration => usage_error(e),
///     Err(e) => bug(e),
/// }
/// ```
use std::path::PathBuf;
use thiserror::Error;

/// Result type for search operations
pub type SearchResult<T> = Result<T, SearchError>;

/// Errors that can occur during search operations
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Search keyword must not be empty")]
    EmptyKeyword,
    #[error("Directory not found: {0}")]
    DirectoryNotFound(PathBuf),
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Invalid UTF-8: {source}")]
    EncodingError {
        path: PathBuf,
        source: std::str::Utf8Error,
    },
    #[error("Internal invariant violated: {0}")]
    InvariantViolation(String),
}

/// Broad classification of a [`SearchError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad input; the search never starts
    Configuration,
    /// A single file could not be scanned; the search continues
    FileAccess,
    /// A programming defect inside the engine
    InternalInvariant,
}

impl SearchError {
    pub fn directory_not_found(path: impl Into<PathBuf>) -> Self {
        Self::DirectoryNotFound(path.into())
    }

    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound(path.into())
    }

    pub fn permission_denied(path: impl Into<PathBuf>) -> Self {
        Self::PermissionDenied(path.into())
    }

    pub fn invalid_pattern(pattern: impl Into<String>) -> Self {
        Self::InvalidPattern(pattern.into())
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    pub fn encoding_error(path: impl Into<PathBuf>, source: std::str::Utf8Error) -> Self {
        Self::EncodingError {
            path: path.into(),
            source,
        }
    }

    pub fn invariant_violation(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    /// Maps an I/O error raised while opening or reading `path`
    pub fn from_io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::file_not_found(path),
            std::io::ErrorKind::PermissionDenied => Self::permission_denied(path),
            _ => Self::IoError(err),
        }
    }

    /// Returns the category that decides how callers react to this error
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::EmptyKeyword
            | Self::DirectoryNotFound(_)
            | Self::InvalidPattern(_)
            | Self::ConfigError(_) => ErrorCategory::Configuration,
            Self::FileNotFound(_)
            | Self::PermissionDenied(_)
            | Self::IoError(_)
            | Self::EncodingError { .. } => ErrorCategory::FileAccess,
            Self::InvariantViolation(_) => ErrorCategory::InternalInvariant,
        }
    }
}

impl From<config::ConfigError> for SearchError {
    fn from(err: config::ConfigError) -> Self {
        Self::ConfigError(err.to_string())
    }
}
