//! Recursive delimiter splitting.
//!
//! Tries progressively finer delimiters until fragments fit within the size
//! target, then merges neighbouring fragments back up with overlap.
//!
//! ## The Algorithm
//!
//! Given delimiters `["\n\n", "\n", " ", ""]` and size `100`:
//!
//! ```text
//! 1. Pick the first delimiter that occurs in the text, say "\n\n".
//!    It is removed from the list handed to deeper levels.
//! 2. Split on it, applying the retention policy.
//! 3. Walk the fragments:
//!    - shorter than 100: collect them
//!    - 100 or longer: merge what was collected so far into chunks,
//!      then split this fragment again with the remaining delimiters
//! 4. Merge whatever is left.
//! ```
//!
//! The empty delimiter `""` splits into single characters and ends the
//! descent. A fragment that is still too large once nothing finer remains is
//! emitted as is, with a warning.
//!
//! ## Priority, Not Best Fit
//!
//! The *first* delimiter in configured order that matches wins, even if a
//! later one would give better-sized pieces. Order your list coarsest first.
//!
//! ## Overlap
//!
//! Chunks produced by one merge share whole trailing fragments:
//!
//! ```text
//! size = 10, overlap = 4, delimiters = [" "], keep = None
//!
//! "aa bbb cc dddd e" -> ["aa bbb cc", "cc dddd e"]
//!                                      ^^ carried over
//! ```

use crate::chunk::{Chunk, ChunkIds};
use crate::delimiter::{split_at_spans, split_chars, Fragments, KeepDelimiter, Separator};
use crate::limits::ChunkLimits;
use crate::merge::{finish, merge_fragments};
use crate::pattern::{Literal, Pattern};
use crate::{Chunker, Result};

const DEFAULT_LIMITS: ChunkLimits = ChunkLimits::new_const(100, 20);

/// Configuration for [`RecursiveChunker`].
///
/// ```rust
/// use cleave::{KeepDelimiter, RecursiveConfig};
///
/// let config = RecursiveConfig::builder()
///     .chunk_size(200)
///     .chunk_overlap(40)
///     .delimiters(["\n\n", "\n", r"\. ", " ", ""])
///     .keep_delimiter(KeepDelimiter::End)
///     .build()?;
///
/// assert_eq!(config.limits().size(), 200);
/// # Ok::<(), cleave::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct RecursiveConfig {
    limits: ChunkLimits,
    separators: Vec<Separator>,
    keep_delimiter: KeepDelimiter,
    trim_whitespace: bool,
}

impl RecursiveConfig {
    /// Delimiters used when none are configured: paragraph, line, word, char.
    pub const DEFAULT_DELIMITERS: [&'static str; 4] = ["\n\n", "\n", " ", ""];

    /// Start building a configuration from the defaults.
    #[must_use]
    pub fn builder() -> RecursiveConfigBuilder {
        RecursiveConfigBuilder::default()
    }

    /// Size and overlap targets.
    #[must_use]
    pub const fn limits(&self) -> ChunkLimits {
        self.limits
    }

    /// Delimiter hierarchy, coarsest first.
    #[must_use]
    pub fn separators(&self) -> &[Separator] {
        &self.separators
    }

    /// Delimiter retention policy.
    #[must_use]
    pub const fn keep_delimiter(&self) -> KeepDelimiter {
        self.keep_delimiter
    }

    /// Whether emitted chunks are trimmed.
    #[must_use]
    pub const fn trim_whitespace(&self) -> bool {
        self.trim_whitespace
    }
}

impl Default for RecursiveConfig {
    fn default() -> Self {
        Self {
            limits: DEFAULT_LIMITS,
            separators: Self::DEFAULT_DELIMITERS
                .iter()
                .map(|&d| match d {
                    "" => Separator::Chars,
                    d => Separator::pattern(Literal::new(d)),
                })
                .collect(),
            keep_delimiter: KeepDelimiter::Start,
            trim_whitespace: true,
        }
    }
}

/// Builder for [`RecursiveConfig`].
#[derive(Debug)]
pub struct RecursiveConfigBuilder {
    chunk_size: usize,
    chunk_overlap: usize,
    delimiters: Vec<String>,
    patterns: Vec<Separator>,
    keep_delimiter: KeepDelimiter,
    trim_whitespace: bool,
}

impl Default for RecursiveConfigBuilder {
    fn default() -> Self {
        Self {
            chunk_size: 100,
            chunk_overlap: 20,
            delimiters: RecursiveConfig::DEFAULT_DELIMITERS
                .iter()
                .map(|d| (*d).to_string())
                .collect(),
            patterns: Vec::new(),
            keep_delimiter: KeepDelimiter::Start,
            trim_whitespace: true,
        }
    }
}

impl RecursiveConfigBuilder {
    /// Target chunk size in characters.
    #[must_use]
    pub fn chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = size;
        self
    }

    /// Overlap between consecutive chunks in characters.
    #[must_use]
    pub fn chunk_overlap(mut self, overlap: usize) -> Self {
        self.chunk_overlap = overlap;
        self
    }

    /// Replace the delimiter hierarchy with regular expressions, coarsest
    /// first. `""` means character-level splitting.
    #[must_use]
    pub fn delimiters<I, S>(mut self, delimiters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.delimiters = delimiters
            .into_iter()
            .map(|d| d.as_ref().to_string())
            .collect();
        self.patterns.clear();
        self
    }

    /// Append a custom matcher after the configured delimiters.
    #[must_use]
    pub fn push_pattern(mut self, pattern: impl Pattern + 'static) -> Self {
        self.patterns.push(Separator::pattern(pattern));
        self
    }

    /// Delimiter retention policy.
    #[must_use]
    pub fn keep_delimiter(mut self, keep: KeepDelimiter) -> Self {
        self.keep_delimiter = keep;
        self
    }

    /// Trim leading and trailing whitespace from every chunk.
    #[must_use]
    pub fn trim_whitespace(mut self, trim: bool) -> Self {
        self.trim_whitespace = trim;
        self
    }

    /// Validate and build the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the size is zero, the overlap is not below the
    /// size, or a delimiter fails to compile.
    pub fn build(self) -> Result<RecursiveConfig> {
        let limits = ChunkLimits::new(self.chunk_size, self.chunk_overlap)?;
        let mut separators = self
            .delimiters
            .iter()
            .map(|d| Separator::parse(d))
            .collect::<Result<Vec<_>>>()?;
        separators.extend(self.patterns);

        Ok(RecursiveConfig {
            limits,
            separators,
            keep_delimiter: self.keep_delimiter,
            trim_whitespace: self.trim_whitespace,
        })
    }
}

/// Recursive delimiter chunker.
///
/// ## Example
///
/// ```rust
/// use cleave::{Chunker, KeepDelimiter, RecursiveChunker, RecursiveConfig};
///
/// let config = RecursiveConfig::builder()
///     .chunk_size(10)
///     .chunk_overlap(2)
///     .delimiters(["!", r"\."])
///     .keep_delimiter(KeepDelimiter::End)
///     .build()?;
///
/// let chunks = RecursiveChunker::new(config).split("no! this is. A split")?;
/// let contents: Vec<_> = chunks.iter().map(|c| c.content.as_str()).collect();
/// assert_eq!(contents, ["no!", "this is.", "A split"]);
/// # Ok::<(), cleave::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecursiveChunker {
    config: RecursiveConfig,
}

impl RecursiveChunker {
    /// Create a chunker from a validated configuration.
    #[must_use]
    pub fn new(config: RecursiveConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    #[must_use]
    pub fn config(&self) -> &RecursiveConfig {
        &self.config
    }

    /// Recursively split `text` using the remaining separators.
    fn split_recursive(
        &self,
        text: &str,
        separators: &[&Separator],
        ids: &mut ChunkIds,
        out: &mut Vec<Chunk>,
    ) {
        let limits = self.config.limits;
        let (fragments, remaining) = self.select_and_split(text, separators);

        // START/END fragments already carry their delimiter.
        let glue = match self.config.keep_delimiter {
            KeepDelimiter::None => fragments.glue,
            KeepDelimiter::Start | KeepDelimiter::End => "",
        };

        let mut pending: Vec<&str> = Vec::new();

        for piece in fragments.pieces {
            let len = piece.chars().count();
            if limits.fits(len) {
                pending.push(piece);
                continue;
            }

            if !pending.is_empty() {
                merge_fragments(
                    &pending,
                    glue,
                    limits,
                    self.config.trim_whitespace,
                    ids,
                    out,
                );
                pending.clear();
            }

            if remaining.is_empty() {
                limits.warn_if_oversized(len);
                out.push(ids.emit(finish(
                    piece.to_string(),
                    self.config.trim_whitespace,
                )));
            } else {
                self.split_recursive(piece, &remaining, ids, out);
            }
        }

        if !pending.is_empty() {
            merge_fragments(
                &pending,
                glue,
                limits,
                self.config.trim_whitespace,
                ids,
                out,
            );
        }
    }

    /// Pick the first separator that matches and split on it.
    ///
    /// Returns the fragments and the separators left for deeper levels.
    fn select_and_split<'t, 's>(
        &self,
        text: &'t str,
        separators: &[&'s Separator],
    ) -> (Fragments<'t>, Vec<&'s Separator>) {
        for (i, separator) in separators.iter().enumerate() {
            match separator {
                Separator::Chars => {
                    tracing::trace!("splitting into characters");
                    return (split_chars(text), Vec::new());
                }
                Separator::Pattern(pattern) => {
                    let spans = pattern.find_spans(text);
                    if spans.is_empty() {
                        continue;
                    }
                    tracing::trace!(delimiter = pattern.as_str(), matches = spans.len());

                    let mut remaining = separators.to_vec();
                    remaining.remove(i);
                    let fragments = split_at_spans(text, &spans, self.config.keep_delimiter);
                    return (fragments, remaining);
                }
            }
        }

        // Nothing matched: fall back to characters and stop descending.
        (split_chars(text), Vec::new())
    }
}

impl Chunker for RecursiveChunker {
    fn split(&self, text: &str) -> Result<Vec<Chunk>> {
        if text.is_empty() {
            return Ok(vec![]);
        }

        let separators: Vec<&Separator> = self.config.separators.iter().collect();
        let mut ids = ChunkIds::default();
        let mut chunks = Vec::with_capacity(self.estimate_chunks(text.len()));

        self.split_recursive(text, &separators, &mut ids, &mut chunks);
        if chunks.is_empty() {
            // Every fragment was blank and got dropped by the retention policy.
            tracing::trace!(len = text.len(), "whitespace-only input kept as one chunk");
            chunks.push(ids.emit(finish(text.to_string(), self.config.trim_whitespace)));
        }

        tracing::debug!(
            chunks = chunks.len(),
            chunk_size = self.config.limits.size(),
            "recursive split finished"
        );
        Ok(chunks)
    }

    fn estimate_chunks(&self, text_len: usize) -> usize {
        let step = self.config.limits.size() - self.config.limits.overlap();
        (text_len / step).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ESSAY: &str = "One of the most important things I didn't understand about the world when I was a child is the degree to which the returns for performance are superlinear.

Teachers and coaches implicitly told us the returns were linear. \"You get out,\" I heard a thousand times, \"what you put in.\" They meant well, but this is rarely true. If your product is only half as good as your competitor's, you don't get half as many customers. You get no customers, and you go out of business.

It's obviously true that the returns for performance are superlinear in business. Some think this is a flaw of capitalism, and that if we changed the rules it would stop being true. But superlinear returns for performance are a feature of the world, not an artifact of rules we've invented. We see the same pattern in fame, power, military victories, knowledge, and even benefit to humanity. In all of these, the rich get richer. [1]
";

    fn contents(config: RecursiveConfig, text: &str) -> Vec<String> {
        RecursiveChunker::new(config)
            .split(text)
            .unwrap()
            .into_iter()
            .map(|c| c.content)
            .collect()
    }

    fn overlap_config(keep: KeepDelimiter) -> RecursiveConfig {
        RecursiveConfig::builder()
            .chunk_size(10)
            .chunk_overlap(2)
            .delimiters(["!", r"\."])
            .keep_delimiter(keep)
            .build()
            .unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = RecursiveConfig::default();
        assert_eq!(config.limits().size(), 100);
        assert_eq!(config.limits().overlap(), 20);
        assert_eq!(config.keep_delimiter(), KeepDelimiter::Start);
        assert!(config.trim_whitespace());
        let delimiters: Vec<&str> = config.separators().iter().map(Separator::as_str).collect();
        assert_eq!(delimiters, ["\n\n", "\n", " ", ""]);
    }

    #[test]
    fn test_builder_rejects_bad_limits() {
        assert!(RecursiveConfig::builder().chunk_size(0).build().is_err());
        assert!(RecursiveConfig::builder()
            .chunk_size(10)
            .chunk_overlap(20)
            .build()
            .is_err());
    }

    #[test]
    fn test_builder_rejects_bad_regex() {
        let result = RecursiveConfig::builder().delimiters(["("]).build();
        assert!(matches!(result, Err(crate::Error::InvalidPattern(_))));
    }

    #[test]
    fn test_keep_none() {
        let chunks = contents(overlap_config(KeepDelimiter::None), "no! this is. A split");
        assert_eq!(chunks, ["no", "this is", "A split"]);
    }

    #[test]
    fn test_keep_start() {
        let chunks = contents(overlap_config(KeepDelimiter::Start), "no! this is. A split");
        assert_eq!(chunks, ["no", "! this is", ". A split"]);
    }

    #[test]
    fn test_keep_end() {
        let chunks = contents(overlap_config(KeepDelimiter::End), "no! this is. A split");
        assert_eq!(chunks, ["no!", "this is.", "A split"]);
    }

    #[test]
    fn test_non_splittable_content() {
        let config = RecursiveConfig::builder()
            .chunk_size(10)
            .chunk_overlap(0)
            .delimiters(["!"])
            .keep_delimiter(KeepDelimiter::None)
            .build()
            .unwrap();
        assert_eq!(contents(config, "no split"), ["no split"]);
    }

    #[test]
    fn test_essay_word_level() {
        let config = RecursiveConfig::builder()
            .chunk_size(65)
            .chunk_overlap(0)
            .build()
            .unwrap();
        let expected = [
            "One of the most important things I didn't understand about the",
            "world when I was a child is the degree to which the returns for",
            "performance are superlinear.",
            "Teachers and coaches implicitly told us the returns were linear.",
            "\"You get out,\" I heard a thousand times, \"what you put in.\" They",
            "meant well, but this is rarely true. If your product is only",
            "half as good as your competitor's, you don't get half as many",
            "customers. You get no customers, and you go out of business.",
            "It's obviously true that the returns for performance are",
            "superlinear in business. Some think this is a flaw of",
            "capitalism, and that if we changed the rules it would stop being",
            "true. But superlinear returns for performance are a feature of",
            "the world, not an artifact of rules we've invented. We see the",
            "same pattern in fame, power, military victories, knowledge, and",
            "even benefit to humanity. In all of these, the rich get richer.",
            "[1]",
        ];

        let chunks = RecursiveChunker::new(config).split(ESSAY).unwrap();
        assert_eq!(chunks.len(), expected.len());
        for (i, (chunk, want)) in chunks.iter().zip(expected).enumerate() {
            assert_eq!(chunk.id, i);
            assert_eq!(chunk.content, want);
        }
    }

    #[test]
    fn test_essay_paragraph_level() {
        let config = RecursiveConfig::builder()
            .chunk_size(450)
            .chunk_overlap(0)
            .build()
            .unwrap();
        let chunks = contents(config, ESSAY);
        assert_eq!(chunks.len(), 3);
        assert!(chunks[0].starts_with("One of the most"));
        assert!(chunks[0].ends_with("superlinear."));
        assert!(chunks[1].starts_with("Teachers"));
        assert!(chunks[2].ends_with("[1]"));
    }

    #[test]
    fn test_first_match_wins() {
        // "-" is listed first, so the spaces survive inside the chunks.
        let config = RecursiveConfig::builder()
            .chunk_size(8)
            .chunk_overlap(0)
            .delimiters(["-", " "])
            .keep_delimiter(KeepDelimiter::None)
            .build()
            .unwrap();
        assert_eq!(contents(config, "ab cd-ef gh"), ["ab cd", "ef gh"]);
    }

    #[test]
    fn test_oversized_fragment_emitted_verbatim() {
        let config = RecursiveConfig::builder()
            .chunk_size(5)
            .chunk_overlap(0)
            .delimiters([" "])
            .keep_delimiter(KeepDelimiter::None)
            .build()
            .unwrap();
        assert_eq!(
            contents(config, "hi supercalifragilistic yo"),
            ["hi", "supercalifragilistic", "yo"]
        );
    }

    #[test]
    fn test_character_fallback() {
        let config = RecursiveConfig::builder()
            .chunk_size(4)
            .chunk_overlap(0)
            .delimiters([" ", ""])
            .build()
            .unwrap();
        assert_eq!(contents(config, "abcdefghij"), ["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_no_match_falls_back_to_characters() {
        let config = RecursiveConfig::builder()
            .chunk_size(4)
            .chunk_overlap(1)
            .delimiters(["!"])
            .build()
            .unwrap();
        assert_eq!(contents(config, "abcdefg"), ["abcd", "defg"]);
    }

    #[test]
    fn test_custom_pattern() {
        let config = RecursiveConfig::builder()
            .chunk_size(6)
            .chunk_overlap(0)
            .delimiters(Vec::<&str>::new())
            .push_pattern(Literal::new("."))
            .keep_delimiter(KeepDelimiter::End)
            .build()
            .unwrap();
        assert_eq!(contents(config, "abc.def.ghi"), ["abc.", "def.", "ghi"]);
    }

    #[test]
    fn test_ids_span_recursion() {
        let config = RecursiveConfig::builder()
            .chunk_size(10)
            .chunk_overlap(0)
            .build()
            .unwrap();
        let text = "short\n\na much longer paragraph that must be split\n\nend";
        let chunks = RecursiveChunker::new(config).split(text).unwrap();
        assert!(chunks.len() > 3);
        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.id, i);
        }
    }

    #[test]
    fn test_empty_text() {
        let chunks = RecursiveChunker::default().split("").unwrap();
        assert!(chunks.is_empty());
    }

    #[test]
    fn test_blank_fragments_fall_back_to_one_chunk() {
        let chunks = RecursiveChunker::default().split(" \n\n \n ").unwrap();
        assert_eq!(chunks, vec![Chunk::new(0, "")]);

        let config = RecursiveConfig::builder()
            .keep_delimiter(KeepDelimiter::End)
            .trim_whitespace(false)
            .build()
            .unwrap();
        assert_eq!(contents(config, "\n\n"), ["\n\n"]);
    }

    #[test]
    fn test_small_text_single_chunk() {
        let chunks = RecursiveChunker::default().split("Small text.").unwrap();
        assert_eq!(chunks, vec![Chunk::new(0, "Small text.")]);
    }
}
