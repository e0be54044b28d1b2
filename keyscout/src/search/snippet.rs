//! Word-bounded context extraction around a keyword match.
//!
//! A fixed radius around the match would routinely cut words in half, so the
//! window is first widened until both edges sit on whitespace (or the line
//! boundary), and then narrowed again by dropping the outermost word on each
//! side when that word is short. Dropping is skipped when the word is longer
//! than [`CONTEXT_RADIUS`], which keeps a single very long token from being
//! sliced while bounding how much extra context it can add.
//!
//! ```text
//! line:    alpha beta gamma delta epsilon zeta eta theta iota kappa lambda mu
//! keyword:                                         theta
//! window:        (start lands inside "delta", grows to its start, then drops it)
//! snippet:                  epsilon zeta eta theta iota kappa lambda mu
//! ```
//!
//! All window arithmetic is done in characters, not bytes, so multi-byte text
//! is never split inside a code point.

/// Target number of characters of context on each side of the match
pub const CONTEXT_RADIUS: usize = 20;

/// Extracts the trimmed, word-bounded snippet around the match at byte range
/// `match_start..match_start + match_len` of `line`.
pub fn extract_snippet(line: &str, match_start: usize, match_len: usize) -> String {
    let chars: Vec<char> = line.chars().collect();
    let len = chars.len();

    let byte_start = floor_char_boundary(line, match_start);
    let byte_end = floor_char_boundary(line, match_start.saturating_add(match_len)).max(byte_start);
    let index = line[..byte_start].chars().count();
    let key_end = index + line[byte_start..byte_end].chars().count();

    let mut start = index.saturating_sub(CONTEXT_RADIUS);
    let mut end = (key_end + CONTEXT_RADIUS).min(len);

    // Widen to whitespace so no edge word is cut
    while start > 0 && !chars[start - 1].is_whitespace() {
        start -= 1;
    }
    while end < len && !chars[end].is_whitespace() {
        end += 1;
    }

    // Drop the outermost word on each side when it is short enough
    if start > 0 && start < len && !chars[start].is_whitespace() {
        let mut candidate = start;
        while candidate < index && !chars[candidate].is_whitespace() {
            candidate += 1;
        }
        if candidate - start <= CONTEXT_RADIUS {
            start = candidate;
        }
    }
    if end < len && end > 0 && !chars[end - 1].is_whitespace() {
        let mut candidate = end;
        while candidate > key_end && !chars[candidate - 1].is_whitespace() {
            candidate -= 1;
        }
        if end - candidate <= CONTEXT_RADIUS {
            end = candidate;
        }
    }

    chars[start..end.max(start)]
        .iter()
        .collect::<String>()
        .trim()
        .to_string()
}

fn floor_char_boundary(text: &str, index: usize) -> usize {
    let mut index = index.min(text.len());
    while !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}
