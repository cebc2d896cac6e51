//! Semantic chunking against a real local embedding model.

#![cfg(feature = "fastembed")]

use cleave::{Chunker, Embedder, FastEmbedder, SemanticChunker, SemanticConfig};

#[test]
#[ignore] // Requires fastembed model download
fn default_model_dimension() {
    let embedder = FastEmbedder::new().expect("Failed to load embedding model");
    assert_eq!(embedder.dimension().unwrap(), 384);
}

#[test]
#[ignore] // Requires fastembed model download
fn semantic_chunker_creates_valid_chunks() {
    let text = "Machine learning is transforming technology. Neural networks \
                can recognize patterns in data. This has applications in image \
                recognition and natural language processing. Climate change is \
                affecting ecosystems worldwide. Rising temperatures impact \
                agriculture and biodiversity. Scientists are studying mitigation \
                strategies.";

    let embedder = FastEmbedder::new().expect("Failed to load embedding model");
    let config = SemanticConfig::builder().percentile(50).build().unwrap();
    let chunks = SemanticChunker::new(embedder, config).split(text).unwrap();

    assert!(!chunks.is_empty(), "Semantic chunker should produce chunks");
    for (i, chunk) in chunks.iter().enumerate() {
        assert_eq!(chunk.id, i);
        assert!(!chunk.is_empty(), "Chunks should not be empty");
    }

    // Every sentence lands in exactly one chunk, in order.
    let rebuilt = chunks
        .iter()
        .map(|c| c.content.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    assert_eq!(rebuilt, text);
}
