//! Benchmarks for page composition.

#![allow(clippy::format_push_string)] // Benchmark setup code, performance not critical

use std::fs;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use docsite_site::{PageComposer, PageComposerConfig, RenderMode};

/// Generate markdown with front-matter and the given structure.
fn generate_markdown(headings: usize, paragraphs_per_section: usize) -> String {
    let mut md = String::with_capacity(headings * 50 + headings * paragraphs_per_section * 200);
    md.push_str("---\ntitle: Operations Guide\ndescription: Runbooks\n---\n");
    md.push_str("# Operations Guide\n\n");

    for i in 0..headings {
        md.push_str(&format!("## Section {i}\n\n"));
        for j in 0..paragraphs_per_section {
            md.push_str(&format!(
                "Paragraph {j} in section {i} with **bold**, *italic* and <kbd>Ctrl</kbd>.\n\n"
            ));
        }
        md.push_str("| key | value |\n|-----|-------|\n| a | 1 |\n\n");
    }
    md
}

fn composer_for(dir: &std::path::Path, mode: RenderMode) -> PageComposer {
    PageComposer::new(PageComposerConfig {
        base_dir: Some(dir.to_path_buf()),
        mode,
        ..PageComposerConfig::default()
    })
}

fn bench_compose_simple(c: &mut Criterion) {
    let temp_dir = tempfile::tempdir().unwrap();
    fs::create_dir(temp_dir.path().join("docs")).unwrap();
    fs::write(temp_dir.path().join("docs/main.md"), "# Hello\n\nWorld").unwrap();
    let composer = composer_for(temp_dir.path(), RenderMode::Markdown);

    c.bench_function("compose_simple_markdown", |b| b.iter(|| composer.compose()));
}

fn bench_compose_missing(c: &mut Criterion) {
    let temp_dir = tempfile::tempdir().unwrap();
    let composer = composer_for(temp_dir.path(), RenderMode::Markdown);

    c.bench_function("compose_missing_source", |b| b.iter(|| composer.compose()));
}

fn bench_compose_varying_sizes(c: &mut Criterion) {
    let temp_dir = tempfile::tempdir().unwrap();
    fs::create_dir(temp_dir.path().join("docs")).unwrap();

    let mut group = c.benchmark_group("compose_by_size");

    for (headings, paragraphs) in [(5, 2), (20, 3), (50, 5)] {
        let markdown = generate_markdown(headings, paragraphs);
        fs::write(temp_dir.path().join("docs/main.md"), &markdown).unwrap();
        group.throughput(Throughput::Bytes(markdown.len() as u64));

        for mode in [RenderMode::Markdown, RenderMode::Verbatim] {
            let composer = composer_for(temp_dir.path(), mode);
            group.bench_with_input(
                BenchmarkId::new(format!("{mode:?}"), format!("{headings}h_{paragraphs}p")),
                &composer,
                |b, composer| b.iter(|| composer.compose()),
            );
        }
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_compose_simple,
    bench_compose_missing,
    bench_compose_varying_sizes
);
criterion_main!(benches);
