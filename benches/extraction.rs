//! Throughput benchmarks for role and acronym extraction.
//!
//! # Usage
//!
//! ```bash
//! cargo bench --bench extraction
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use docent::{DocumentAnalyzer, ExtractionConfig, ExtractionMode};

const BENCH_PARAGRAPH: &str = "The Systems Engineer (SE) shall maintain the technical baseline. \
Changes are approved by the Configuration Control Board (CCB) and reviewed by the \
Program Manager. The Contracting Officer's Representative (COR) shall monitor performance. \
Guidance, Navigation and Control (GN&C) hardware is verified before the PDR.\n";

fn document(paragraphs: usize) -> String {
    BENCH_PARAGRAPH.repeat(paragraphs)
}

fn bench_modes(c: &mut Criterion) {
    let mut group = c.benchmark_group("roles");
    let text = document(20);
    group.throughput(Throughput::Bytes(text.len() as u64));

    for mode in [ExtractionMode::Discovery, ExtractionMode::Strict] {
        let analyzer = DocumentAnalyzer::new(ExtractionConfig::default().with_mode(mode));
        group.bench_with_input(BenchmarkId::from_parameter(mode), &text, |b, t| {
            b.iter(|| analyzer.extract_roles(black_box(t)))
        });
    }
    group.finish();
}

fn bench_acronyms(c: &mut Criterion) {
    let analyzer = DocumentAnalyzer::new(ExtractionConfig::default());
    let text = document(20);
    c.bench_function("acronyms", |b| b.iter(|| analyzer.extract_acronyms(black_box(&text))));
}

fn bench_document_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze");
    let analyzer = DocumentAnalyzer::new(ExtractionConfig::default());
    for n in [1, 10, 100] {
        let text = document(n);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &text, |b, t| {
            b.iter(|| analyzer.analyze(black_box(t), &[], None))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_modes, bench_acronyms, bench_document_size);
criterion_main!(benches);
