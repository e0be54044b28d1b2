use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{trace, warn};

use super::matcher::KeywordMatcher;
use super::snippet::extract_snippet;
use crate::config::EncodingMode;
use crate::errors::{SearchError, SearchResult};
use crate::results::Match;

const BUFFER_CAPACITY: usize = 65536;

/// Decodes one raw line according to the encoding mode
fn decode_line<'a>(
    bytes: &'a [u8],
    path: &Path,
    encoding_mode: EncodingMode,
    warned: &mut bool,
) -> SearchResult<Cow<'a, str>> {
    match encoding_mode {
        EncodingMode::FailFast => std::str::from_utf8(bytes)
            .map(Cow::Borrowed)
            .map_err(|e| SearchError::encoding_error(path, e)),
        EncodingMode::Lossy => {
            let text = String::from_utf8_lossy(bytes);
            // Owned means at least one sequence was replaced
            if matches!(text, Cow::Owned(_)) && !*warned {
                warn!("Invalid UTF-8 replaced in file: {}", path.display());
                *warned = true;
            }
            Ok(text)
        }
    }
}

/// Strips a trailing `\n` or `\r\n`
fn strip_line_ending(mut bytes: &[u8]) -> &[u8] {
    if let Some(rest) = bytes.strip_suffix(b"\n") {
        bytes = rest;
        if let Some(rest) = bytes.strip_suffix(b"\r") {
            bytes = rest;
        }
    }
    bytes
}

/// Scans files line by line for the first keyword occurrence on each line
#[derive(Debug, Clone)]
pub struct LineScanner {
    matcher: KeywordMatcher,
    encoding_mode: EncodingMode,
}

impl LineScanner {
    pub fn new(matcher: KeywordMatcher, encoding_mode: EncodingMode) -> Self {
        Self {
            matcher,
            encoding_mode,
        }
    }

    pub fn matcher(&self) -> &KeywordMatcher {
        &self.matcher
    }

    /// Returns one match per matching line, in line order.
    ///
    /// Any open, read or decoding failure aborts this file only; the caller
    /// decides how to report it.
    pub fn scan_file(&self, path: &Path) -> SearchResult<Vec<Match>> {
        trace!("Scanning file: {}", path.display());

        let file = File::open(path).map_err(|e| SearchError::from_io(path, e))?;
        let mut reader = BufReader::with_capacity(BUFFER_CAPACITY, file);
        let mut buffer = Vec::with_capacity(256);
        let mut matches = Vec::new();
        let mut line_number = 0;
        let mut warned = false;

        loop {
            buffer.clear();
            let read = reader
                .read_until(b'\n', &mut buffer)
                .map_err(|e| SearchError::from_io(path, e))?;
            if read == 0 {
                break;
            }
            line_number += 1;

            let line = decode_line(
                strip_line_ending(&buffer),
                path,
                self.encoding_mode,
                &mut warned,
            )?;

            if let Some((start, end)) = self.matcher.find(&line) {
                trace!("Found match at line {}: {}", line_number, line);
                matches.push(Match {
                    path: path.to_path_buf(),
                    line_number,
                    snippet: extract_snippet(&line, start, end - start),
                });
            }
        }

        trace!("Found {} matches in file {}", matches.len(), path.display());
        Ok(matches)
    }
}
