//! Similarity scores and percentile break points.
//!
//! ## Cosine Similarity
//!
//! ```text
//! cos(a, b) = a·b / (‖a‖ ‖b‖)
//! ```
//!
//! Computed in `f64`. A zero vector has no direction, so any pair involving
//! one yields NaN rather than a made-up value.
//!
//! ## Nearest-Rank Percentile
//!
//! ```text
//! scores (sorted): [10 15 20 25 30 35 40 45 50 55 60 65 70 75]   n = 14
//! percentile 95:   rank = ceil(0.95 × 14) = 14  ->  threshold = 75
//! ```
//!
//! Every index whose score is at or above the threshold is a break point.
//! NaN scores sort last and never compare at or above anything.

use crate::sentence::Sentence;
use crate::{Error, Result};

/// Cosine similarity of two equally sized vectors.
///
/// # Errors
///
/// Returns an error if the vectors differ in length.
///
/// # Examples
///
/// ```rust
/// use cleave::similarity::cosine_similarity;
///
/// let sim = cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).unwrap();
/// assert_eq!(sim, 0.0);
/// assert!(cosine_similarity(&[0.0, 0.0], &[0.0, 0.0]).unwrap().is_nan());
/// ```
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f64> {
    if a.len() != b.len() {
        return Err(Error::DimensionMismatch {
            left: a.len(),
            right: b.len(),
        });
    }

    let mut dot = 0.0_f64;
    let mut norm_a = 0.0_f64;
    let mut norm_b = 0.0_f64;
    for (&x, &y) in a.iter().zip(b) {
        let (x, y) = (f64::from(x), f64::from(y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    Ok(dot / (norm_a.sqrt() * norm_b.sqrt()))
}

/// Similarity of every adjacent pair of embedded sentences: entry `i`
/// compares sentence `i` with sentence `i + 1`.
///
/// Each pair is independent; results are written in index order.
///
/// # Errors
///
/// Returns an error if any two neighbours have embeddings of different length.
pub fn similarities(sentences: &[Sentence]) -> Result<Vec<f64>> {
    sentences
        .windows(2)
        .map(|pair| cosine_similarity(&pair[0].embedding, &pair[1].embedding))
        .collect()
}

/// Score at the given nearest-rank percentile.
///
/// # Errors
///
/// Returns an error if `scores` is empty or `percentile` is outside `1..=99`.
pub fn percentile_threshold(scores: &[f64], percentile: u8) -> Result<f64> {
    if scores.is_empty() {
        return Err(Error::Empty("similarities"));
    }
    if !(1..=99).contains(&percentile) {
        return Err(Error::InvalidPercentile(percentile));
    }

    let mut sorted = scores.to_vec();
    sorted.sort_by(f64::total_cmp);

    // ceil(p / 100 * n), kept in integers so 95% of 20 is exactly 19.
    let rank = (usize::from(percentile) * sorted.len()).div_ceil(100);
    Ok(sorted[rank - 1])
}

/// Indices whose score is at or above the percentile threshold.
///
/// # Errors
///
/// Returns an error if `scores` is empty or `percentile` is outside `1..=99`.
///
/// # Examples
///
/// ```rust
/// use cleave::similarity::breakpoints;
///
/// let scores: Vec<f64> = (0..14).map(|i| 10.0 + 5.0 * f64::from(i)).collect();
/// assert_eq!(breakpoints(&scores, 95).unwrap(), vec![13]);
/// ```
pub fn breakpoints(scores: &[f64], percentile: u8) -> Result<Vec<usize>> {
    let threshold = percentile_threshold(scores, percentile)?;
    tracing::trace!(threshold, percentile, "breakpoint threshold");

    Ok(scores
        .iter()
        .enumerate()
        .filter(|(_, &score)| score >= threshold)
        .map(|(i, _)| i)
        .collect())
}
