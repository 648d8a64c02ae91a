//! Export formatter benchmarks.
//!
//! The formatters sit on the render path of every export view, so keep an
//! eye on their cost even though palettes are tiny.
//!
//! Run with: cargo bench --bench export_formatting

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use paleta::export::ExportFormat;
use paleta::types::{ColorInfo, Palette};

fn sample_palette() -> Palette {
    let color = |name: &str, hex: &str| ColorInfo {
        name: name.to_string(),
        hex: hex.to_string(),
        rgb: [37, 99, 235],
        hsl: [217, 83, 53],
    };
    Palette {
        primary: color("Royal Blue", "#2563EB"),
        secondary: color("Slate", "#64748B"),
        accent: color("Amber Pop", "#F59E0B"),
        background: color("Snow", "#F8FAFC"),
        text: color("Charcoal", "#0F172A"),
    }
}

fn bench_formats(c: &mut Criterion) {
    let palette = sample_palette();
    let mut group = c.benchmark_group("export_render");

    for format in ExportFormat::all() {
        group.bench_with_input(
            BenchmarkId::from_parameter(format),
            &format,
            |b, format| b.iter(|| black_box(format.render(black_box(&palette)))),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_formats);
criterion_main!(benches);
