//! Criterion benchmarks for citation extraction.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use verse_xref::count::count_citations;
use verse_xref::extract::{html_to_text, CitationExtractor};
use verse_xref::models::Language;

const ZH_PARAGRAPH: &str =
    "經上記著說：約翰福音3:16，又參《羅馬書》八章28節、詩一一九105與猶大書14節。";
const EN_PARAGRAPH: &str =
    "As written in John 3:16, see also Rom 8:28, 1 Cor 13:4 and Song of Solomon 2:1. ";

fn bench_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract");

    for (language, paragraph) in [(Language::Zh, ZH_PARAGRAPH), (Language::En, EN_PARAGRAPH)] {
        let extractor = CitationExtractor::new(language);

        for repeats in [10, 100, 1000] {
            let text = paragraph.repeat(repeats);
            let id = BenchmarkId::new(language.as_str(), repeats);
            group.bench_with_input(id, &text, |b, text| {
                b.iter(|| extractor.extract(black_box(text)))
            });
        }
    }

    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    let extractor = CitationExtractor::new(Language::Zh);
    let html = format!(
        "<html><body>{}</body></html>",
        format!("<p>{}</p>", ZH_PARAGRAPH).repeat(200)
    );

    c.bench_function("html_to_counts", |b| {
        b.iter(|| {
            let text = html_to_text(black_box(&html));
            count_citations(&extractor.extract(&text))
        })
    });
}

fn bench_pattern_build(c: &mut Criterion) {
    c.bench_function("build_zh_extractor", |b| {
        b.iter(|| CitationExtractor::new(black_box(Language::Zh)))
    });
}

criterion_group!(benches, bench_extraction, bench_pipeline, bench_pattern_build);
criterion_main!(benches);
