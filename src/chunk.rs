//! The Chunk type: one emitted piece of text.

/// A piece of text produced by a chunker.
///
/// Ids are assigned in emission order during a single `split` call, starting
/// at zero and increasing by one per chunk:
///
/// ```rust
/// use cleave::{Chunk, Chunker, RecursiveChunker, RecursiveConfig};
///
/// let config = RecursiveConfig::builder().chunk_size(10).chunk_overlap(0).build()?;
/// let chunks = RecursiveChunker::new(config).split("one two three four")?;
///
/// for (expected, chunk) in chunks.iter().enumerate() {
///     assert_eq!(chunk.id, expected);
/// }
/// # Ok::<(), cleave::Error>(())
/// ```
///
/// Unlike a byte span, the content of a chunk is not always a verbatim slice
/// of the input: trimming, glue reinsertion, and sentence joining can all
/// change it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Chunk {
    /// Position of this chunk in the output sequence.
    pub id: usize,
    /// The chunk text.
    pub content: String,
}

impl Chunk {
    /// Create a new chunk.
    #[must_use]
    pub fn new(id: usize, content: impl Into<String>) -> Self {
        Self {
            id,
            content: content.into(),
        }
    }

    /// The length of this chunk in characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.content.chars().count()
    }

    /// Whether this chunk is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

impl std::fmt::Display for Chunk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Chunk {{ id: {}, len: {} }}", self.id, self.len())
    }
}

/// Hands out chunk ids for one `split` call.
///
/// Threaded by `&mut` through recursion so ids stay strictly increasing over
/// the whole call tree.
#[derive(Debug, Default)]
pub(crate) struct ChunkIds {
    next: usize,
}

impl ChunkIds {
    pub(crate) fn emit(&mut self, content: impl Into<String>) -> Chunk {
        let chunk = Chunk::new(self.next, content);
        self.next += 1;
        chunk
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_len_counts_chars() {
        let chunk = Chunk::new(0, "日本語");
        assert_eq!(chunk.len(), 3);
        assert!(!chunk.is_empty());
    }

    #[test]
    fn test_ids_increase() {
        let mut ids = ChunkIds::default();
        let a = ids.emit("a");
        let b = ids.emit("b");
        assert_eq!((a.id, b.id), (0, 1));
    }
}
