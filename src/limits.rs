//! Chunk size and overlap limits.
//!
//! ## Target, Not Ceiling
//!
//! `size` is what chunks aim for. A chunker can only cut where its delimiters
//! allow, so a fragment that no remaining delimiter can shrink is emitted as is
//! and a warning is logged:
//!
//! ```text
//! size = 10, delimiters = [" "]
//! Text: "supercalifragilistic is long"
//!
//! Chunks: ["supercalifragilistic", "is long"]
//!          ↑ 20 chars, no delimiter left to split it
//! ```
//!
//! `overlap` is how much trailing context the next chunk may carry over.
//! It must stay strictly below `size`, otherwise a chunk could consist of
//! nothing but the previous chunk's tail.

use crate::{Error, Result};

/// Validated chunk size and overlap pair, measured in characters.
///
/// # Examples
///
/// ```rust
/// use cleave::ChunkLimits;
///
/// let limits = ChunkLimits::new(100, 20).unwrap();
/// assert_eq!(limits.size(), 100);
/// assert_eq!(limits.overlap(), 20);
///
/// assert!(ChunkLimits::new(0, 0).is_err());
/// assert!(ChunkLimits::new(10, 10).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkLimits {
    size: usize,
    overlap: usize,
}

impl ChunkLimits {
    /// Create limits with the given target size and overlap.
    ///
    /// # Errors
    ///
    /// Returns an error if `size == 0` or `overlap >= size`.
    pub fn new(size: usize, overlap: usize) -> Result<Self> {
        if size == 0 {
            return Err(Error::InvalidChunkSize(size));
        }
        if overlap >= size {
            return Err(Error::OverlapExceedsSize { size, overlap });
        }
        Ok(Self { size, overlap })
    }

    /// Limits for compile-time constants.
    ///
    /// Only used to initialise `const` items, so invalid arguments fail the
    /// build rather than a call.
    pub(crate) const fn new_const(size: usize, overlap: usize) -> Self {
        assert!(overlap < size, "overlap must be below size");
        Self { size, overlap }
    }

    /// The target chunk size.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// The overlap carried between consecutive chunks.
    #[must_use]
    pub const fn overlap(&self) -> usize {
        self.overlap
    }

    /// Whether a fragment is small enough to be merged with its neighbours.
    #[must_use]
    pub const fn fits(&self, len: usize) -> bool {
        len < self.size
    }

    /// Log a soft violation if `len` is over the target.
    pub(crate) fn warn_if_oversized(&self, len: usize) {
        if len > self.size {
            tracing::warn!(
                size = len,
                limit = self.size,
                "created a chunk of size {len}, which is longer than the specified {}",
                self.size
            );
        }
    }
}
