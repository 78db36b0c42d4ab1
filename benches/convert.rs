//! Benchmarks for the conversion pipeline.
//!
//! Run with: cargo bench

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};

fn sample_document() -> String {
    let mut source = String::from("# Benchmark Document\n\n");
    for index in 0..50 {
        source.push_str(&format!(
            "## Section {index}\n\n\
             A paragraph with **bold**, *italic*, and `inline code`.\n\n\
             * first point\n* second point\n\n\
             > a quoted remark\n\n\
             | name | value |\n|---|---:|\n| alpha | 1 |\n| beta | 2 |\n\n\
             ```java\n// compute\nint total = add(40, 2);\nString label = \"answer\";\n```\n\n"
        ));
    }
    source
}

fn bench_render_html(c: &mut Criterion) {
    let source = sample_document();
    c.bench_function("render_html", |b| {
        b.iter(|| mdpress::document::render_html(black_box(&source)));
    });
}

fn bench_convert(c: &mut Criterion) {
    let source = sample_document();
    c.bench_function("convert", |b| {
        b.iter(|| mdpress::convert(black_box(&source), "bench.md").unwrap());
    });
}

criterion_group!(benches, bench_render_html, bench_convert);
criterion_main!(benches);
