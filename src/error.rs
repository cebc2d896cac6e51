//! Error types for cleave.

/// Errors that can occur while configuring or running a chunker.
///
/// Size overruns are not errors: a chunk that cannot be shrunk any further is
/// still emitted and a warning is logged instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid chunk size (must be > 0).
    #[error("invalid chunk size: {0} (must be > 0)")]
    InvalidChunkSize(usize),

    /// Overlap is not smaller than the chunk size.
    #[error("overlap {overlap} must be smaller than chunk size {size}")]
    OverlapExceedsSize {
        /// The chunk size.
        size: usize,
        /// The overlap that was too large.
        overlap: usize,
    },

    /// Percentile outside `1..=99`.
    #[error("invalid percentile: {0} (must be between 1 and 99)")]
    InvalidPercentile(u8),

    /// Buffer size of zero.
    #[error("invalid buffer size: {0} (must be > 0)")]
    InvalidBufferSize(usize),

    /// Buffer size not smaller than the number of sentences.
    #[error("buffer size {buffer} must be smaller than the number of sentences ({sentences})")]
    BufferTooLarge {
        /// The configured buffer size.
        buffer: usize,
        /// Number of sentences found in the input.
        sentences: usize,
    },

    /// Two embeddings of different lengths were compared.
    #[error("embedding dimensions differ: {left} vs {right}")]
    DimensionMismatch {
        /// Length of the first vector.
        left: usize,
        /// Length of the second vector.
        right: usize,
    },

    /// The embedder returned a different number of vectors than inputs.
    #[error("embedder returned {actual} vectors for {expected} inputs")]
    EmbeddingCount {
        /// Number of texts sent.
        expected: usize,
        /// Number of vectors received.
        actual: usize,
    },

    /// Break points must be strictly increasing and inside the sentence range.
    #[error("invalid break points {points:?} for {sentences} sentences")]
    InvalidBreakpoints {
        /// The offending break points.
        points: Vec<usize>,
        /// Number of sentences being grouped.
        sentences: usize,
    },

    /// A required list was empty.
    #[error("the list of {0} cannot be empty")]
    Empty(&'static str),

    /// A delimiter or sentence pattern failed to compile.
    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// Embedding model error.
    #[error("embedding error: {0}")]
    Embedding(String),
}

/// Result type for cleave operations.
pub type Result<T> = std::result::Result<T, Error>;
