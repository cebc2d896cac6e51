//! Delimiters and what happens to them when text is split.
//!
//! ## Retention Policy
//!
//! ```text
//! Text: "no! this is", delimiter: "!"
//!
//! None:  ["no", " this is"]     <- delimiter dropped, re-inserted as glue on merge
//! Start: ["no", "! this is"]    <- delimiter opens the following fragment
//! End:   ["no!", " this is"]    <- delimiter closes the preceding fragment
//! ```
//!
//! Under `Start` and `End` the fragments already carry the delimiter text, so
//! they are merged back together with no glue at all.

use std::ops::Range;
use std::sync::Arc;

use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

use crate::pattern::Pattern;
use crate::Result;

/// Where delimiter text ends up after a split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeepDelimiter {
    /// Discard the delimiter.
    None,
    /// Prefix it onto the fragment that follows.
    Start,
    /// Suffix it onto the fragment that precedes.
    End,
}

/// One level of a delimiter hierarchy.
#[derive(Debug, Clone)]
pub enum Separator {
    /// Split wherever the pattern matches.
    Pattern(Arc<dyn Pattern>),
    /// Split into single characters. Terminal: nothing finer exists.
    Chars,
}

impl Separator {
    /// Parse a delimiter as a regular expression. The empty string means
    /// character-level splitting.
    ///
    /// # Errors
    ///
    /// Returns an error if `source` is not a valid regular expression.
    pub fn parse(source: &str) -> Result<Self> {
        if source.is_empty() {
            return Ok(Self::Chars);
        }
        Ok(Self::Pattern(Arc::new(Regex::new(source)?)))
    }

    /// Wrap a custom matcher.
    #[must_use]
    pub fn pattern(pattern: impl Pattern + 'static) -> Self {
        Self::Pattern(Arc::new(pattern))
    }

    /// Source form, `""` for character-level.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pattern(p) => p.as_str(),
            Self::Chars => "",
        }
    }
}

/// Fragments of one split plus the glue that joins them back together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Fragments<'a> {
    pub(crate) pieces: Vec<&'a str>,
    pub(crate) glue: &'a str,
}

/// Split `text` into single characters.
///
/// Uses extended grapheme clusters so combining marks stay with their base.
pub(crate) fn split_chars(text: &str) -> Fragments<'_> {
    Fragments {
        pieces: text.graphemes(true).collect(),
        glue: "",
    }
}

/// Split `text` at the given match spans, applying the retention policy.
pub(crate) fn split_at_spans<'a>(
    text: &'a str,
    spans: &[Range<usize>],
    keep: KeepDelimiter,
) -> Fragments<'a> {
    match keep {
        KeepDelimiter::None => {
            let mut pieces = Vec::with_capacity(spans.len() + 1);
            let mut prev = 0;
            for span in spans {
                pieces.push(&text[prev..span.start]);
                prev = span.end;
            }
            pieces.push(&text[prev..]);
            pieces.retain(|p| !p.is_empty());

            Fragments {
                pieces,
                glue: spans.first().map_or("", |s| &text[s.clone()]),
            }
        }
        KeepDelimiter::Start => {
            let mut pieces = Vec::with_capacity(spans.len() + 1);
            let mut prev = 0;
            for span in spans {
                pieces.push(&text[prev..span.start]);
                prev = span.start;
            }
            pieces.push(&text[prev..]);
            pieces.retain(|p| !is_blank(p));

            Fragments { pieces, glue: "" }
        }
        KeepDelimiter::End => {
            let mut pieces = Vec::with_capacity(spans.len() + 1);
            let mut prev = 0;
            for span in spans {
                pieces.push(&text[prev..span.end]);
                prev = span.end;
            }
            pieces.push(&text[prev..]);
            pieces.retain(|p| !is_blank(p));

            Fragments { pieces, glue: "" }
        }
    }
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split<'a>(text: &'a str, pattern: &str, keep: KeepDelimiter) -> Fragments<'a> {
        let re = Regex::new(pattern).unwrap();
        split_at_spans(text, &re.find_spans(text), keep)
    }

    #[test]
    fn test_none_drops_delimiter() {
        let f = split("no! this is", "!", KeepDelimiter::None);
        assert_eq!(f.pieces, vec!["no", " this is"]);
        assert_eq!(f.glue, "!");
    }

    #[test]
    fn test_none_drops_empty_pieces() {
        let f = split("!!a!!", "!", KeepDelimiter::None);
        assert_eq!(f.pieces, vec!["a"]);
    }

    #[test]
    fn test_start_prefixes_following() {
        let f = split("no! this is. A split", r"\.", KeepDelimiter::Start);
        assert_eq!(f.pieces, vec!["no! this is", ". A split"]);
        assert_eq!(f.glue, "");
    }

    #[test]
    fn test_end_suffixes_preceding() {
        let f = split("no! this is. A split", r"\.", KeepDelimiter::End);
        assert_eq!(f.pieces, vec!["no! this is.", " A split"]);
    }

    #[test]
    fn test_leading_delimiter_is_kept() {
        let f = split("!abc", "!", KeepDelimiter::Start);
        assert_eq!(f.pieces, vec!["!abc"]);

        let f = split("!abc", "!", KeepDelimiter::End);
        assert_eq!(f.pieces, vec!["!", "abc"]);
    }

    #[test]
    fn test_blank_pieces_dropped() {
        let f = split("a\n\n\nb", "\n", KeepDelimiter::Start);
        assert_eq!(f.pieces, vec!["a", "\nb"]);
    }

    #[test]
    fn test_split_chars() {
        let f = split_chars("ab日");
        assert_eq!(f.pieces, vec!["a", "b", "日"]);
    }

    #[test]
    fn test_parse_empty_is_chars() {
        assert!(matches!(Separator::parse("").unwrap(), Separator::Chars));
        assert!(Separator::parse("(").is_err());
        assert_eq!(Separator::parse(r"\n").unwrap().as_str(), r"\n");
    }
}
