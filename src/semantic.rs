//! Semantic chunking using embedding similarity.
//!
//! Groups sentences by where their embeddings change, instead of by size.
//!
//! ## The Pipeline
//!
//! ```text
//! text
//!   │ split_sentences      "A. B. C. D."  ->  [A] [B] [C] [D]
//!   │ combine_windows      buffer 1       ->  "A B", "A B C", "B C D", "C D"
//!   │ embed_sentences      one batch call ->  E0 E1 E2 E3
//!   │ similarities         adjacent pairs ->  s0 s1 s2
//!   │ breakpoints          percentile     ->  [1]
//!   ▼ assemble_chunks      group ends     ->  "A B" | "C D"
//! ```
//!
//! Every stage is a public function, so a pipeline can be run piecewise or
//! with a stage swapped out.
//!
//! ## Break Points
//!
//! A break point is the inclusive index of the last sentence in a group.
//! Indices at or above the configured percentile of adjacent similarity are
//! selected:
//!
//! | Percentile | Effect |
//! |------------|--------|
//! | 99 | Only the most extreme pair splits |
//! | 95 | Default, few large chunks |
//! | 50 | Roughly half the pairs split |
//!
//! ## Context Windows
//!
//! Each sentence is embedded together with `buffer_size` neighbours on either
//! side. Short sentences ("Yes.", "See above.") otherwise produce noisy
//! vectors that dominate the similarity signal.
//!
//! ## Cost
//!
//! One embedder call per `split`, plus O(n × d) for similarity, where n is
//! the sentence count and d the embedding width.

use crate::chunk::{Chunk, ChunkIds};
use crate::embed::Embedder;
use crate::sentence::{combine_windows, split_sentences, Sentence, SentenceSplit};
use crate::similarity::{breakpoints, similarities};
use crate::{Chunker, Error, Result};

/// Configuration for [`SemanticChunker`].
#[derive(Debug, Clone)]
pub struct SemanticConfig {
    sentence_split: SentenceSplit,
    percentile: u8,
    buffer_size: usize,
}

impl SemanticConfig {
    /// Start building a configuration from the defaults.
    #[must_use]
    pub fn builder() -> SemanticConfigBuilder {
        SemanticConfigBuilder::default()
    }

    /// How text is cut into sentences.
    #[must_use]
    pub fn sentence_split(&self) -> &SentenceSplit {
        &self.sentence_split
    }

    /// Percentile of adjacent similarity that marks a break point.
    #[must_use]
    pub const fn percentile(&self) -> u8 {
        self.percentile
    }

    /// Neighbours on each side included in a sentence's context window.
    #[must_use]
    pub const fn buffer_size(&self) -> usize {
        self.buffer_size
    }
}

impl Default for SemanticConfig {
    fn default() -> Self {
        Self {
            sentence_split: SentenceSplit::default(),
            percentile: 95,
            buffer_size: 1,
        }
    }
}

/// Builder for [`SemanticConfig`].
#[derive(Debug, Clone)]
pub struct SemanticConfigBuilder {
    sentence_split: SentenceSplit,
    percentile: u8,
    buffer_size: usize,
}

impl Default for SemanticConfigBuilder {
    fn default() -> Self {
        let defaults = SemanticConfig::default();
        Self {
            sentence_split: defaults.sentence_split,
            percentile: defaults.percentile,
            buffer_size: defaults.buffer_size,
        }
    }
}

impl SemanticConfigBuilder {
    /// Sentence splitting strategy.
    #[must_use]
    pub fn sentence_split(mut self, split: SentenceSplit) -> Self {
        self.sentence_split = split;
        self
    }

    /// Break point percentile, `1..=99`.
    #[must_use]
    pub fn percentile(mut self, percentile: u8) -> Self {
        self.percentile = percentile;
        self
    }

    /// Context window radius in sentences.
    #[must_use]
    pub fn buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    /// Validate and build the configuration.
    ///
    /// Whether the buffer fits the input can only be checked per call.
    ///
    /// # Errors
    ///
    /// Returns an error if the percentile is outside `1..=99` or the buffer
    /// size is zero.
    pub fn build(self) -> Result<SemanticConfig> {
        if !(1..=99).contains(&self.percentile) {
            return Err(Error::InvalidPercentile(self.percentile));
        }
        if self.buffer_size == 0 {
            return Err(Error::InvalidBufferSize(self.buffer_size));
        }
        Ok(SemanticConfig {
            sentence_split: self.sentence_split,
            percentile: self.percentile,
            buffer_size: self.buffer_size,
        })
    }
}

/// Semantic chunker over an injected [`Embedder`].
///
/// ## Example
///
/// ```rust
/// use cleave::{Chunker, Embedder, SemanticChunker, SemanticConfig};
///
/// /// Embeds by whether the text mentions weather.
/// struct Topic;
///
/// impl Embedder for Topic {
///     fn embed_batch(&self, texts: &[String]) -> cleave::Result<Vec<Vec<f32>>> {
///         Ok(texts
///             .iter()
///             .map(|t| if t.contains("rain") { vec![0.0, 1.0] } else { vec![1.0, 0.0] })
///             .collect())
///     }
/// }
///
/// let chunker = SemanticChunker::new(Topic, SemanticConfig::default());
/// let chunks = chunker.split("Only one sentence here")?;
///
/// assert_eq!(chunks.len(), 1);
/// assert_eq!(chunks[0].content, "Only one sentence here");
/// # Ok::<(), cleave::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct SemanticChunker<E> {
    embedder: E,
    config: SemanticConfig,
}

impl<E: Embedder> SemanticChunker<E> {
    /// Create a chunker from an embedder and a validated configuration.
    #[must_use]
    pub fn new(embedder: E, config: SemanticConfig) -> Self {
        Self { embedder, config }
    }

    /// Create a chunker with the default configuration.
    #[must_use]
    pub fn with_defaults(embedder: E) -> Self {
        Self::new(embedder, SemanticConfig::default())
    }

    /// The configuration in use.
    #[must_use]
    pub fn config(&self) -> &SemanticConfig {
        &self.config
    }

    /// The embedder in use.
    #[must_use]
    pub fn embedder(&self) -> &E {
        &self.embedder
    }
}

impl<E: Embedder> Chunker for SemanticChunker<E> {
    fn split(&self, text: &str) -> Result<Vec<Chunk>> {
        if text.is_empty() {
            return Ok(vec![]);
        }

        let pattern = self.config.sentence_split.pattern();
        let mut sentences = split_sentences(text, &*pattern);

        match sentences.len() {
            0 => return Err(Error::Empty("sentences")),
            1 => {
                tracing::debug!("single sentence, skipping embedding");
                let only = sentences.swap_remove(0);
                return Ok(vec![Chunk::new(0, only.content)]);
            }
            _ => {}
        }

        combine_windows(&mut sentences, self.config.buffer_size)?;
        embed_sentences(&self.embedder, &mut sentences)?;

        let scores = similarities(&sentences)?;
        let points = breakpoints(&scores, self.config.percentile)?;
        let chunks = assemble_chunks(&sentences, &points)?;

        tracing::debug!(
            sentences = sentences.len(),
            breakpoints = points.len(),
            chunks = chunks.len(),
            "semantic split finished"
        );
        Ok(chunks)
    }

    fn estimate_chunks(&self, text_len: usize) -> usize {
        // Rough guess at topic density.
        (text_len / 1000).max(1)
    }
}

/// Embed every sentence's context window in one batch and store the vectors.
///
/// # Errors
///
/// Returns an error if `sentences` is empty, the embedder fails, it returns
/// the wrong number of vectors, or the vectors differ in width.
pub fn embed_sentences<E: Embedder + ?Sized>(
    embedder: &E,
    sentences: &mut [Sentence],
) -> Result<()> {
    if sentences.is_empty() {
        return Err(Error::Empty("sentences"));
    }

    let texts: Vec<String> = sentences.iter().map(|s| s.combined.clone()).collect();
    let vectors = embedder.embed_batch(&texts)?;

    if vectors.len() != sentences.len() {
        return Err(Error::EmbeddingCount {
            expected: sentences.len(),
            actual: vectors.len(),
        });
    }

    let width = vectors[0].len();
    if let Some(odd) = vectors.iter().find(|v| v.len() != width) {
        return Err(Error::DimensionMismatch {
            left: width,
            right: odd.len(),
        });
    }

    for (sentence, vector) in sentences.iter_mut().zip(vectors) {
        sentence.embedding = vector;
    }
    Ok(())
}

/// Group sentences into chunks, ending a group at each break point.
///
/// Break points are inclusive group ends. Groups are joined with a single
/// space; a group ending at the last sentence leaves no trailing group.
///
/// ```rust
/// use cleave::{assemble_chunks, Sentence};
///
/// let sentences: Vec<Sentence> = ["a", "b", "c", "d"]
///     .iter()
///     .enumerate()
///     .map(|(i, s)| Sentence::new(i, *s))
///     .collect();
///
/// let chunks = assemble_chunks(&sentences, &[1])?;
/// assert_eq!(chunks[0].content, "a b");
/// assert_eq!(chunks[1].content, "c d");
/// # Ok::<(), cleave::Error>(())
/// ```
///
/// # Errors
///
/// Returns an error if `sentences` is empty, or the break points are not
/// strictly increasing indices into `sentences`.
pub fn assemble_chunks(sentences: &[Sentence], points: &[usize]) -> Result<Vec<Chunk>> {
    if sentences.is_empty() {
        return Err(Error::Empty("sentences"));
    }
    let in_range = !points.last().is_some_and(|&last| last >= sentences.len());
    let increasing = points.windows(2).all(|w| w[0] < w[1]);
    if !in_range || !increasing {
        return Err(Error::InvalidBreakpoints {
            points: points.to_vec(),
            sentences: sentences.len(),
        });
    }

    let mut ids = ChunkIds::default();
    let mut chunks = Vec::with_capacity(points.len() + 1);
    let mut start = 0;

    let ends = points.iter().map(|&p| p + 1).chain(Some(sentences.len()));
    for end in ends {
        if start == end {
            continue;
        }
        let content = sentences[start..end]
            .iter()
            .map(|s| s.content.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        chunks.push(ids.emit(content));
        start = end;
    }

    Ok(chunks)
}
