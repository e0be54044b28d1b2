use crate::search::matcher::KeywordMatcher;

/// A piece of a snippet, either plain text or a keyword occurrence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Plain(&'a str),
    Keyword(&'a str),
}

impl<'a> Segment<'a> {
    pub fn text(&self) -> &'a str {
        match self {
            Segment::Plain(text) | Segment::Keyword(text) => text,
        }
    }
}

/// Splits `snippet` into plain and keyword segments so a renderer can color
/// every occurrence, not just the one that produced the match.
///
/// Concatenating the segment texts gives back `snippet` unchanged.
pub fn highlight_segments<'a>(snippet: &'a str, matcher: &KeywordMatcher) -> Vec<Segment<'a>> {
    let mut segments = Vec::new();
    let mut cursor = 0;

    for (start, end) in matcher.find_all(snippet) {
        if start > cursor {
            segments.push(Segment::Plain(&snippet[cursor..start]));
        }
        segments.push(Segment::Keyword(&snippet[start..end]));
        cursor = end;
    }
    if cursor < snippet.len() {
        segments.push(Segment::Plain(&snippet[cursor..]));
    }

    segments
}
