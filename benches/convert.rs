//! Conversion throughput benchmarks.
//!
//! Run with: cargo bench --bench convert

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use threadify::core::SourceDocument;
use threadify::thread::{OversizePolicy, ThreadConfig, ThreadConverter, convert_batch};

/// Markdown-ish article with `sections` sections.
fn generate_article(sections: usize) -> String {
    let mut text = String::new();
    for i in 0..sections {
        text.push_str(&format!("## Section {i}\n\n"));
        text.push_str(
            "Most teams **overthink** their launch copy. Write the *first* draft fast. \
             Then cut it in half, and link the [details](https://example.com/details). ",
        );
        text.push_str(&"Every sentence should earn its place in the thread. ".repeat(6));
        text.push_str("\n\n- One idea per post\n- Lead with the hook\n\n");
    }
    text
}

fn bench_convert(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert");
    let preserve = ThreadConverter::new();
    let hard_wrap = ThreadConverter::with_config(ThreadConfig::new().oversize(OversizePolicy::HardWrap))
        .unwrap_or_default();

    for sections in [1, 10, 100] {
        let article = generate_article(sections);
        group.throughput(Throughput::Bytes(article.len() as u64));

        group.bench_with_input(BenchmarkId::new("preserve", sections), &article, |b, text| {
            b.iter(|| preserve.convert(black_box(text), Some("Launch notes #Launch")));
        });
        group.bench_with_input(BenchmarkId::new("hard_wrap", sections), &article, |b, text| {
            b.iter(|| hard_wrap.convert(black_box(text), Some("Launch notes #Launch")));
        });
    }
    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let converter = ThreadConverter::new();
    let documents: Vec<SourceDocument> = (0..64)
        .map(|i| SourceDocument::new(generate_article(5)).with_name(format!("doc-{i}")))
        .collect();

    c.bench_function("convert_batch_64", |b| {
        b.iter(|| convert_batch(&converter, black_box(&documents)));
    });
}

criterion_group!(benches, bench_convert, bench_batch);
criterion_main!(benches);
