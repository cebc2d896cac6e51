//! Benchmarks for text chunking strategies.

use cleave::{
    Chunker, Embedder, FixedChunker, FixedConfig, RecursiveChunker, RecursiveConfig,
    SemanticChunker,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

fn sample_text(size: usize) -> String {
    // Generate realistic text with sentence and paragraph structure
    let sentences = [
        "The quick brown fox jumps over the lazy dog. ",
        "Pack my box with five dozen liquor jugs. ",
        "How vexingly quick daft zebras jump! ",
        "The five boxing wizards jump quickly.\n\n",
        "Sphinx of black quartz, judge my vow. ",
    ];
    let mut text = String::with_capacity(size);
    let mut i = 0;
    while text.len() < size {
        text.push_str(sentences[i % sentences.len()]);
        i += 1;
    }
    text.truncate(size);
    text
}

/// Letter histogram, cheap enough to keep the embedder out of the measurement.
struct LetterHistogram;

impl Embedder for LetterHistogram {
    fn embed_batch(&self, texts: &[String]) -> cleave::Result<Vec<Vec<f32>>> {
        Ok(texts
            .iter()
            .map(|t| {
                let mut v = vec![0.0; 26];
                for b in t.bytes().filter(u8::is_ascii_lowercase) {
                    v[usize::from(b - b'a')] += 1.0;
                }
                v
            })
            .collect())
    }
}

fn bench_fixed_chunker(c: &mut Criterion) {
    let mut group = c.benchmark_group("fixed_chunker");

    for size in [1_000, 10_000, 100_000] {
        let text = sample_text(size);
        let config = FixedConfig::builder()
            .chunk_size(500)
            .chunk_overlap(50)
            .build()
            .unwrap();
        let chunker = FixedChunker::new(config);

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("fixed", size), &text, |b, text| {
            b.iter(|| chunker.split(black_box(text)))
        });
    }

    group.finish();
}

fn bench_recursive_chunker(c: &mut Criterion) {
    let mut group = c.benchmark_group("recursive_chunker");

    // Paragraphs -> lines -> sentences -> words -> characters
    let delimiters = ["\n\n", "\n", r"\. ", " ", ""];

    for size in [1_000, 10_000, 100_000] {
        let text = sample_text(size);
        let config = RecursiveConfig::builder()
            .chunk_size(500)
            .chunk_overlap(50)
            .delimiters(delimiters)
            .build()
            .unwrap();
        let chunker = RecursiveChunker::new(config);

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("recursive", size), &text, |b, text| {
            b.iter(|| chunker.split(black_box(text)))
        });
    }

    group.finish();
}

fn bench_semantic_chunker(c: &mut Criterion) {
    let mut group = c.benchmark_group("semantic_chunker");
    let chunker = SemanticChunker::with_defaults(LetterHistogram);

    for size in [1_000, 10_000, 100_000] {
        let text = sample_text(size);

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("semantic", size), &text, |b, text| {
            b.iter(|| chunker.split(black_box(text)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_fixed_chunker,
    bench_recursive_chunker,
    bench_semantic_chunker
);
criterion_main!(benches);
