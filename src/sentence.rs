//! Sentence splitting and context windows for semantic chunking.
//!
//! ## Splitting
//!
//! Sentences are whatever lies between matches of the configured
//! [`SentenceSplit`] pattern:
//!
//! ```text
//! Punctuation: "Hi there. How are u? Fine"  -> ["Hi there.", "How are u?", "Fine"]
//! LineBreak:   "a. b\nc"                    -> ["a. b", "c"]
//! Paragraph:   "a\n\nb\nc"                  -> ["a", "b\nc"]
//! ```
//!
//! Trailing empty pieces are dropped. A leading empty piece is kept when the
//! text starts with a non-empty match.
//!
//! ## Context Windows
//!
//! A single sentence is a thin signal to embed. Each sentence also gets a
//! `combined` text: itself plus `buffer_size` neighbours on each side.
//!
//! ```text
//! buffer_size = 1
//!
//! sentences: [S0] [S1] [S2] [S3]
//! combined:  S0 S1
//!            S0 S1 S2
//!               S1 S2 S3
//!                  S2 S3
//! ```
//!
//! The window slides: one sentence joins at the back, one leaves at the
//! front, so building all windows costs O(total text), not
//! O(sentences × buffer_size) joins.

use std::collections::VecDeque;
use std::sync::Arc;

use regex::Regex;

use crate::pattern::{Literal, Pattern, PunctuationBreak};
use crate::{Error, Result};

/// A sentence moving through the semantic pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Sentence {
    /// Position in the input.
    pub index: usize,
    /// Raw sentence text.
    pub content: String,
    /// Context window text; equals `content` until windows are built.
    pub combined: String,
    /// Embedding vector; empty until embedded.
    pub embedding: Vec<f32>,
}

impl Sentence {
    /// Create a sentence with `combined` set to its own content.
    #[must_use]
    pub fn new(index: usize, content: impl Into<String>) -> Self {
        let content = content.into();
        Self {
            index,
            combined: content.clone(),
            content,
            embedding: Vec::new(),
        }
    }
}

/// How input text is cut into sentences.
#[derive(Debug, Clone, Default)]
pub enum SentenceSplit {
    /// Whitespace after `.`, `?` or `!`; the mark stays with its sentence.
    #[default]
    Punctuation,
    /// Every `\n`.
    LineBreak,
    /// Every `\n\n`.
    Paragraph,
    /// A caller-supplied matcher.
    Custom(Arc<dyn Pattern>),
}

impl SentenceSplit {
    /// Split on a caller-supplied regular expression.
    ///
    /// # Errors
    ///
    /// Returns an error if `source` is not a valid regular expression.
    pub fn regex(source: &str) -> Result<Self> {
        Ok(Self::Custom(Arc::new(Regex::new(source)?)))
    }

    /// Split on a caller-supplied matcher.
    #[must_use]
    pub fn custom(pattern: impl Pattern + 'static) -> Self {
        Self::Custom(Arc::new(pattern))
    }

    /// The matcher behind this strategy.
    #[must_use]
    pub fn pattern(&self) -> Arc<dyn Pattern> {
        match self {
            Self::Punctuation => Arc::new(PunctuationBreak::new()),
            Self::LineBreak => Arc::new(Literal::new("\n")),
            Self::Paragraph => Arc::new(Literal::new("\n\n")),
            Self::Custom(pattern) => Arc::clone(pattern),
        }
    }
}

/// Split `text` into indexed sentences.
pub fn split_sentences(text: &str, pattern: &dyn Pattern) -> Vec<Sentence> {
    let mut pieces = Vec::new();
    let mut prev = 0;

    for span in pattern.find_spans(text) {
        if span.start == 0 && span.is_empty() {
            continue;
        }
        pieces.push(&text[prev..span.start]);
        prev = span.end;
    }
    pieces.push(&text[prev..]);

    while pieces.last().is_some_and(|p| p.is_empty()) {
        pieces.pop();
    }

    pieces
        .into_iter()
        .enumerate()
        .map(|(index, content)| Sentence::new(index, content))
        .collect()
}

/// Fill in `combined` for every sentence: the space-joined contents of
/// sentences `i - buffer_size ..= i + buffer_size`, clipped to the slice.
///
/// # Errors
///
/// Returns an error if `sentences` is empty, `buffer_size` is zero, or
/// `buffer_size` is not smaller than the number of sentences.
pub fn combine_windows(sentences: &mut [Sentence], buffer_size: usize) -> Result<()> {
    if sentences.is_empty() {
        return Err(Error::Empty("sentences"));
    }
    if buffer_size == 0 {
        return Err(Error::InvalidBufferSize(buffer_size));
    }
    let n = sentences.len();
    if buffer_size >= n {
        return Err(Error::BufferTooLarge {
            buffer: buffer_size,
            sentences: n,
        });
    }

    let mut window = JoinedWindow::with_capacity(2 * buffer_size + 1);
    for sentence in &sentences[..=buffer_size] {
        window.push_back(&sentence.content);
    }

    for i in 0..n {
        sentences[i].combined.clone_from(&window.text);

        if let Some(next) = sentences.get(i + buffer_size + 1) {
            window.push_back(&next.content);
        }
        if i >= buffer_size {
            window.pop_front();
        }
    }

    Ok(())
}

/// Space-joined text with O(1) bookkeeping per push and pop.
#[derive(Debug)]
struct JoinedWindow {
    text: String,
    lens: VecDeque<usize>,
}

impl JoinedWindow {
    fn with_capacity(sentences: usize) -> Self {
        Self {
            text: String::new(),
            lens: VecDeque::with_capacity(sentences),
        }
    }

    fn push_back(&mut self, sentence: &str) {
        if !self.lens.is_empty() {
            self.text.push(' ');
        }
        self.text.push_str(sentence);
        self.lens.push_back(sentence.len());
    }

    fn pop_front(&mut self) {
        if let Some(len) = self.lens.pop_front() {
            let sep = usize::from(!self.lens.is_empty());
            self.text.drain(..len + sep);
        }
    }
}
