//! Pluggable text matchers.
//!
//! Chunkers never call into `regex` directly. They ask a [`Pattern`] for the
//! byte spans of its matches, so a literal matcher or a hand-written scanner
//! can stand in for a regular expression without touching chunker logic.

use std::fmt;
use std::ops::Range;

use regex::Regex;

/// Something that can locate delimiter occurrences in text.
///
/// Spans must be non-overlapping, in ascending order, and lie on char
/// boundaries of the haystack.
pub trait Pattern: fmt::Debug + Send + Sync {
    /// Byte spans of every match in `haystack`.
    fn find_spans(&self, haystack: &str) -> Vec<Range<usize>>;

    /// Whether the pattern occurs anywhere in `haystack`.
    fn is_match(&self, haystack: &str) -> bool {
        !self.find_spans(haystack).is_empty()
    }

    /// Source form of the pattern, for diagnostics.
    fn as_str(&self) -> &str;
}

impl Pattern for Regex {
    fn find_spans(&self, haystack: &str) -> Vec<Range<usize>> {
        self.find_iter(haystack).map(|m| m.range()).collect()
    }

    fn is_match(&self, haystack: &str) -> bool {
        Regex::is_match(self, haystack)
    }

    fn as_str(&self) -> &str {
        Regex::as_str(self)
    }
}

/// Matches a fixed string, with no regex interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal(String);

impl Literal {
    /// Create a literal matcher. An empty needle matches nothing.
    #[must_use]
    pub fn new(needle: impl Into<String>) -> Self {
        Self(needle.into())
    }
}

impl Pattern for Literal {
    fn find_spans(&self, haystack: &str) -> Vec<Range<usize>> {
        if self.0.is_empty() {
            return Vec::new();
        }
        haystack
            .match_indices(self.0.as_str())
            .map(|(start, m)| start..start + m.len())
            .collect()
    }

    fn is_match(&self, haystack: &str) -> bool {
        !self.0.is_empty() && haystack.contains(self.0.as_str())
    }

    fn as_str(&self) -> &str {
        &self.0
    }
}

/// Whitespace that follows `.`, `?` or `!`.
///
/// The punctuation itself is not part of the match, so splitting on this
/// pattern leaves it attached to the preceding sentence. `regex` has no
/// look-behind, so this is a small scanner instead of an expression.
#[derive(Debug, Clone, Copy, Default)]
pub struct PunctuationBreak;

impl PunctuationBreak {
    /// Create the matcher.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Pattern for PunctuationBreak {
    fn find_spans(&self, haystack: &str) -> Vec<Range<usize>> {
        let mut spans = Vec::new();
        let mut chars = haystack.char_indices().peekable();
        while let Some((_, c)) = chars.next() {
            if !matches!(c, '.' | '?' | '!') {
                continue;
            }
            let Some(&(start, _)) = chars.peek() else {
                break;
            };
            let mut end = start;
            while let Some((i, w)) = chars.next_if(|(_, w)| w.is_whitespace()) {
                end = i + w.len_utf8();
            }
            if end > start {
                spans.push(start..end);
            }
        }
        spans
    }

    fn as_str(&self) -> &str {
        "(?<=[.?!])\\s+"
    }
}
