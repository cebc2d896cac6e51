//! # cleave
//!
//! Text chunking for retrieval-augmented generation (RAG) pipelines.
//!
//! ## The Problem
//!
//! Embedding models and language models have context windows. Documents
//! don't fit. They have to be cut into pieces ("chunks") small enough to
//! embed and retrieve, but large enough to keep their meaning.
//!
//! Cutting every N characters breaks words and sentences, while cutting on
//! paragraphs leaves some chunks far too large. Each strategy here makes a
//! different trade.
//!
//! ## Chunking Strategies
//!
//! ### Fixed Size (Baseline)
//!
//! Split once on a single delimiter, then pack pieces up to the size target
//! with overlap carried between chunks.
//!
//! ```text
//! size = 10, overlap = 3, delimiter = " "
//!
//! "the cat sat on a mat today"
//!   -> ["the cat", "cat sat on", "on a mat", "mat today"]
//! ```
//!
//! **When to use**: Homogeneous content, baseline comparisons.
//! **Weakness**: A piece longer than the target stays oversized.
//!
//! ### Recursive
//!
//! Try the coarsest delimiter first. Fragments that are still too large are
//! split again with the finer delimiters that remain. Last resort: single
//! characters.
//!
//! ```text
//! Delimiters: ["\n\n", "\n", " ", ""]
//!
//! 1. Split on "\n\n" (paragraphs)
//! 2. Paragraph too large? Split it on "\n" (lines)
//! 3. Still too large? Split on " " (words)
//! 4. Still too large? Split on "" (characters)
//! ```
//!
//! Delimiters can be dropped, kept at the start of the following fragment,
//! or kept at the end of the preceding one ([`KeepDelimiter`]).
//!
//! **When to use**: General-purpose, mixed content.
//! **Weakness**: The delimiter hierarchy is heuristic, not semantic.
//!
//! ### Semantic (Embedding-Based)
//!
//! Split into sentences, embed each with its neighbours, compare adjacent
//! embeddings and cut at percentile break points.
//!
//! ```text
//! Sentences:    [S0, S1, S2, S3, S4]
//! Similarities:   0.91 0.88 0.35 0.90
//! Break points: indices at or above the chosen percentile
//! ```
//!
//! The embedding model is injected through the [`Embedder`] trait. Enable
//! the `fastembed` feature for a ready-made local model.
//!
//! **When to use**: Topic coherence matters more than size uniformity.
//! **Weakness**: Needs an embedding model; chunk sizes are unbounded.
//!
//! ## Quick Start
//!
//! ```rust
//! use cleave::{Chunker, FixedChunker, FixedConfig, RecursiveChunker, RecursiveConfig};
//!
//! let text = "The quick brown fox jumps over the lazy dog.\n\n\
//!             Pack my box with five dozen liquor jugs.";
//!
//! // Recursive with the default delimiters: the whole text fits in one chunk
//! let chunks = RecursiveChunker::default().split(text)?;
//! assert_eq!(chunks.len(), 1);
//!
//! // Recursive with custom delimiters
//! let config = RecursiveConfig::builder()
//!     .chunk_size(30)
//!     .chunk_overlap(5)
//!     .delimiters(["\n\n", r"\. ", " "])
//!     .build()?;
//! let chunks = RecursiveChunker::new(config).split(text)?;
//! assert!(chunks.len() > 2);
//!
//! // Fixed size on words
//! let config = FixedConfig::builder().chunk_size(50).chunk_overlap(10).build()?;
//! let chunks = FixedChunker::new(config).split(text)?;
//! assert_eq!(chunks[0].id, 0);
//! # Ok::<(), cleave::Error>(())
//! ```
//!
//! ## Sizes
//!
//! Sizes and overlaps count Unicode scalar values, not bytes. The size is a
//! target: a fragment that no delimiter can shrink further is emitted as is
//! and a `tracing` warning is logged.
//!
//! ## Performance Considerations
//!
//! | Strategy | Speed | Embedder calls |
//! |----------|-------|----------------|
//! | Fixed | O(n) | 0 |
//! | Recursive | O(n × depth) | 0 |
//! | Semantic | O(n × d) | 1 per split |
//!
//! Where n = document length, d = embedding dimension.

mod chunk;
mod delimiter;
pub mod embed;
mod error;
mod fixed;
mod limits;
mod merge;
pub mod pattern;
mod recursive;
mod semantic;
pub mod sentence;
pub mod similarity;

pub use chunk::Chunk;
pub use delimiter::{KeepDelimiter, Separator};
pub use embed::Embedder;
#[cfg(feature = "fastembed")]
pub use embed::FastEmbedder;
pub use error::{Error, Result};
pub use fixed::{FixedChunker, FixedConfig, FixedConfigBuilder};
pub use limits::ChunkLimits;
pub use pattern::{Literal, Pattern, PunctuationBreak};
pub use recursive::{RecursiveChunker, RecursiveConfig, RecursiveConfigBuilder};
pub use semantic::{
    assemble_chunks, embed_sentences, SemanticChunker, SemanticConfig, SemanticConfigBuilder,
};
pub use sentence::{combine_windows, split_sentences, Sentence, SentenceSplit};
pub use similarity::{breakpoints, cosine_similarity, percentile_threshold, similarities};

/// A text chunking strategy.
///
/// All chunkers implement this trait, enabling polymorphic usage:
///
/// ```rust
/// use cleave::{Chunk, Chunker, FixedChunker, FixedConfig, RecursiveChunker};
///
/// fn chunk_document(chunker: &dyn Chunker, text: &str) -> cleave::Result<Vec<Chunk>> {
///     chunker.split(text)
/// }
///
/// let config = FixedConfig::builder().chunk_size(100).chunk_overlap(10).build()?;
/// let fixed = FixedChunker::new(config);
/// let recursive = RecursiveChunker::default();
///
/// let text = "Hello world. This is a test.";
/// assert_eq!(chunk_document(&fixed, text)?.len(), 1);
/// assert_eq!(chunk_document(&recursive, text)?.len(), 1);
/// # Ok::<(), cleave::Error>(())
/// ```
pub trait Chunker: Send + Sync {
    /// Split text into chunks with ids counting up from 0.
    ///
    /// Empty text gives no chunks. Any other text gives at least one, even
    /// when every fragment is blank.
    ///
    /// # Errors
    ///
    /// Returns an error when the input cannot be processed under the
    /// configuration, or an injected collaborator fails.
    fn split(&self, text: &str) -> Result<Vec<Chunk>>;

    /// Estimate the number of chunks for a given text length.
    ///
    /// Useful for pre-allocation. May be approximate.
    fn estimate_chunks(&self, text_len: usize) -> usize {
        // Conservative default
        (text_len / 500).max(1)
    }
}
