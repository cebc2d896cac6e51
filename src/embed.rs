//! The embedding capability consumed by the semantic chunker.
//!
//! Chunking never loads a model itself. Anything that turns text into
//! fixed-width vectors can implement [`Embedder`], including remote API
//! clients and toy embedders in tests.
//!
//! With the `fastembed` feature enabled, `FastEmbedder` wraps fastembed's
//! default model (BGE-small-en, 384 dimensions).

use std::sync::Arc;

use crate::{Error, Result};

/// Turns text into embedding vectors.
///
/// One vector per input, in input order, all of the same width.
pub trait Embedder: Send + Sync {
    /// Embed a batch of texts.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying model fails.
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Embed a single text as a batch of one.
    ///
    /// # Errors
    ///
    /// Returns an error if the model fails or returns no vector.
    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut vectors = self.embed_batch(&[text.to_string()])?;
        let actual = vectors.len();
        match vectors.pop() {
            Some(vector) if actual == 1 => Ok(vector),
            _ => Err(Error::EmbeddingCount {
                expected: 1,
                actual,
            }),
        }
    }

    /// Width of the vectors this embedder produces, found by embedding a probe.
    ///
    /// # Errors
    ///
    /// Returns an error if the probe cannot be embedded.
    fn dimension(&self) -> Result<usize> {
        Ok(self.embed("a")?.len())
    }
}

impl<E: Embedder + ?Sized> Embedder for &E {
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        (**self).embed_batch(texts)
    }
}

impl<E: Embedder + ?Sized> Embedder for Arc<E> {
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        (**self).embed_batch(texts)
    }
}

impl<E: Embedder + ?Sized> Embedder for Box<E> {
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        (**self).embed_batch(texts)
    }
}

/// [`Embedder`] backed by fastembed's default text model.
#[cfg(feature = "fastembed")]
pub struct FastEmbedder {
    model: fastembed::TextEmbedding,
}

#[cfg(feature = "fastembed")]
impl FastEmbedder {
    /// Load the default model, downloading it on first use.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedding model fails to load.
    pub fn new() -> Result<Self> {
        let model = fastembed::TextEmbedding::try_new(Default::default())
            .map_err(|e| Error::Embedding(e.to_string()))?;
        tracing::debug!("fastembed model loaded");
        Ok(Self { model })
    }

    /// Wrap an already initialised model.
    #[must_use]
    pub fn from_model(model: fastembed::TextEmbedding) -> Self {
        Self { model }
    }
}

#[cfg(feature = "fastembed")]
impl Embedder for FastEmbedder {
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let texts: Vec<&str> = texts.iter().map(String::as_str).collect();
        self.model
            .embed(texts, None)
            .map_err(|e| Error::Embedding(e.to_string()))
    }
}

#[cfg(feature = "fastembed")]
impl std::fmt::Debug for FastEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FastEmbedder").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Length and vowel count of each text.
    struct Counts;

    impl Embedder for Counts {
        fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            Ok(texts
                .iter()
                .map(|t| {
                    let vowels = t.chars().filter(|c| "aeiou".contains(*c)).count();
                    vec![t.len() as f32, vowels as f32]
                })
                .collect())
        }
    }

    /// Always returns nothing.
    struct Silent;

    impl Embedder for Silent {
        fn embed_batch(&self, _texts: &[String]) -> Result<Vec<Vec<f32>>> {
            Ok(vec![])
        }
    }

    #[test]
    fn test_embed_is_batch_of_one() {
        assert_eq!(Counts.embed("banana").unwrap(), vec![6.0, 3.0]);
    }

    #[test]
    fn test_dimension_probe() {
        assert_eq!(Counts.dimension().unwrap(), 2);
    }

    #[test]
    fn test_embed_missing_vector() {
        assert!(matches!(
            Silent.embed("x"),
            Err(Error::EmbeddingCount {
                expected: 1,
                actual: 0
            })
        ));
    }

    #[test]
    fn test_forwarding_impls() {
        let shared: Arc<dyn Embedder> = Arc::new(Counts);
        assert_eq!(shared.dimension().unwrap(), 2);
        let boxed: Box<dyn Embedder> = Box::new(Counts);
        assert_eq!(boxed.embed("io").unwrap(), vec![2.0, 2.0]);
    }
}
