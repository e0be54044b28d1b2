use regex::{Regex, RegexBuilder};
use std::sync::Arc;

use crate::errors::{SearchError, SearchResult};

/// Strategy for locating a literal keyword
#[derive(Debug, Clone)]
pub enum MatchStrategy {
    /// Ordinal, byte-for-byte comparison
    Exact(String),
    /// Ordinal comparison of per-char uppercase forms. The regex is an escaped
    /// literal under case folding and only proposes candidates; each one is
    /// confirmed char by char, so e.g. `k` never matches the Kelvin sign.
    IgnoreCase(Arc<Regex>),
}

/// Finds a literal keyword in text, with or without case sensitivity.
///
/// The scanner uses [`KeywordMatcher::find`] for the first occurrence on a line,
/// and highlighting uses [`KeywordMatcher::find_all`] on the snippet, so both
/// agree on what counts as a match.
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    keyword: String,
    strategy: MatchStrategy,
}

impl KeywordMatcher {
    /// Creates a matcher for `keyword`. Fails on an empty keyword.
    pub fn new(keyword: &str, case_sensitive: bool) -> SearchResult<Self> {
        if keyword.is_empty() {
            return Err(SearchError::EmptyKeyword);
        }

        let strategy = if case_sensitive {
            MatchStrategy::Exact(keyword.to_string())
        } else {
            let regex = RegexBuilder::new(&regex::escape(keyword))
                .case_insensitive(true)
                .build()
                .map_err(|e| SearchError::invalid_pattern(e.to_string()))?;
            MatchStrategy::IgnoreCase(Arc::new(regex))
        };

        Ok(Self {
            keyword: keyword.to_string(),
            strategy,
        })
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn is_case_sensitive(&self) -> bool {
        matches!(self.strategy, MatchStrategy::Exact(_))
    }

    /// Byte range of the first occurrence in `text`
    pub fn find(&self, text: &str) -> Option<(usize, usize)> {
        match &self.strategy {
            MatchStrategy::Exact(keyword) => text
                .find(keyword.as_str())
                .map(|start| (start, start + keyword.len())),
            MatchStrategy::IgnoreCase(regex) => self.find_ignore_case(regex, text, 0),
        }
    }

    /// Byte ranges of all non-overlapping occurrences, left to right
    pub fn find_all(&self, text: &str) -> Vec<(usize, usize)> {
        match &self.strategy {
            MatchStrategy::Exact(keyword) => text
                .match_indices(keyword.as_str())
                .map(|(start, matched)| (start, start + matched.len()))
                .collect(),
            MatchStrategy::IgnoreCase(regex) => {
                let mut found = Vec::new();
                let mut pos = 0;
                while let Some((start, end)) = self.find_ignore_case(regex, text, pos) {
                    found.push((start, end));
                    pos = end;
                }
                found
            }
        }
    }

    fn find_ignore_case(&self, regex: &Regex, text: &str, from: usize) -> Option<(usize, usize)> {
        let mut pos = from;
        while let Some(m) = regex.find_at(text, pos) {
            if eq_ignore_case_ordinal(m.as_str(), &self.keyword) {
                return Some((m.start(), m.end()));
            }
            // Retry one char further on; an overlapping candidate may still confirm
            pos = m.start() + m.as_str().chars().next().map_or(1, char::len_utf8);
        }
        None
    }
}

fn simple_uppercase(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

/// Equal when every char pair has the same single-char uppercase form
fn eq_ignore_case_ordinal(a: &str, b: &str) -> bool {
    a.chars().count() == b.chars().count()
        && a
            .chars()
            .zip(b.chars())
            .all(|(x, y)| simple_uppercase(x) == simple_uppercase(y))
}
