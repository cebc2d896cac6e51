//! Merging small fragments into chunks with overlap.
//!
//! ```text
//! size = 10, overlap = 4, glue = " "
//! fragments: ["aa", "bbb", "cc", "dddd", "e"]
//!
//! window [aa bbb cc]    len 9, + " dddd" = 14 > 10 -> emit "aa bbb cc"
//! evict "aa", "bbb"     len 2 <= 4
//! window [cc dddd e]    len 9 -> emit "cc dddd e"
//! ```
//!
//! Eviction works on whole fragments, so the carried overlap can fall short
//! of the target when fragments are coarse. It never exceeds it.

use std::collections::VecDeque;

use crate::chunk::{Chunk, ChunkIds};
use crate::limits::ChunkLimits;

/// Sliding window of fragments with a running length in characters.
///
/// `len` counts every fragment plus one glue between each adjacent pair.
#[derive(Debug)]
pub(crate) struct Window<'a> {
    pieces: VecDeque<(&'a str, usize)>,
    len: usize,
    glue: &'a str,
    glue_len: usize,
}

impl<'a> Window<'a> {
    pub(crate) fn new(glue: &'a str) -> Self {
        Self {
            pieces: VecDeque::new(),
            len: 0,
            glue,
            glue_len: glue.chars().count(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Length the window would have after pushing a fragment of `piece_len`.
    fn len_with(&self, piece_len: usize) -> usize {
        let glue = if self.is_empty() { 0 } else { self.glue_len };
        self.len + piece_len + glue
    }

    pub(crate) fn push(&mut self, piece: &'a str) {
        let piece_len = piece.chars().count();
        self.len = self.len_with(piece_len);
        self.pieces.push_back((piece, piece_len));
    }

    /// Drop fragments from the front until the window is no longer than `max`.
    pub(crate) fn evict_to(&mut self, max: usize) {
        while self.len > max {
            let Some((_, piece_len)) = self.pieces.pop_front() else {
                break;
            };
            let glue = if self.is_empty() { 0 } else { self.glue_len };
            self.len -= piece_len + glue;
        }
    }

    pub(crate) fn join(&self) -> String {
        let mut out = String::new();
        for (i, (piece, _)) in self.pieces.iter().enumerate() {
            if i > 0 {
                out.push_str(self.glue);
            }
            out.push_str(piece);
        }
        out
    }
}

/// Merge fragments shorter than the target size into chunks.
pub(crate) fn merge_fragments(
    pieces: &[&str],
    glue: &str,
    limits: ChunkLimits,
    trim: bool,
    ids: &mut ChunkIds,
    out: &mut Vec<Chunk>,
) {
    let mut window = Window::new(glue);

    for &piece in pieces {
        let piece_len = piece.chars().count();

        if window.len_with(piece_len) > limits.size() {
            limits.warn_if_oversized(window.len());

            if !window.is_empty() {
                out.push(ids.emit(finish(window.join(), trim)));
                window.evict_to(limits.overlap());
            }
        }

        window.push(piece);
    }

    if !window.is_empty() {
        out.push(ids.emit(finish(window.join(), trim)));
    }
}

pub(crate) fn finish(content: String, trim: bool) -> String {
    if trim {
        let trimmed = content.trim();
        if trimmed.len() == content.len() {
            content
        } else {
            trimmed.to_string()
        }
    } else {
        content
    }
}
