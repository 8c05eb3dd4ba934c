//! Benchmarks for relayout conversion.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use relayout::{LayoutOptions, MemorySource, Token};

/// Create a synthetic two-column page: a full-width heading, a small
/// aligned table in the left column and running text in both columns.
fn create_page(number: usize) -> Vec<Token> {
    let mut tokens = vec![
        Token::new(format!("Section {}", number), 250.0, 760.0, 22.0),
        Token::new("Overview", 350.0, 760.0, 22.0),
    ];

    for row in 0..40 {
        let y = 720.0 - row as f32 * 14.0;
        let text = if row % 5 == 4 {
            "closes the paragraph with a citation 3,4,5.".to_string()
        } else {
            format!("line {} of the left column continues", row)
        };
        tokens.push(Token::new(text, 72.0, y, 10.0));
        tokens.push(Token::new(
            format!("right column text {} with doi:10.1000/x{}", row, row),
            380.0,
            y - 6.0,
            10.0,
        ));
    }

    for row in 0..4 {
        let y = 140.0 - row as f32 * 12.0;
        for (col, x) in [72.0, 140.0, 210.0].into_iter().enumerate() {
            tokens.push(Token::new(format!("c{}{}", row, col), x, y, 9.0));
        }
    }

    tokens
}

fn create_document(pages: usize) -> MemorySource {
    MemorySource::new((1..=pages).map(create_page).collect())
}

/// Benchmark full conversion at various sizes.
fn bench_conversion(c: &mut Criterion) {
    let mut group = c.benchmark_group("conversion");

    for page_count in [1, 10, 50].iter() {
        let source = create_document(*page_count);

        group.bench_function(format!("{}_pages", page_count), |b| {
            b.iter(|| relayout::to_markdown(black_box(&source)).unwrap());
        });

        group.bench_function(format!("{}_pages_sequential", page_count), |b| {
            b.iter(|| {
                relayout::convert_with_options(
                    black_box(&source),
                    LayoutOptions::default().sequential(),
                )
                .unwrap()
            });
        });
    }

    group.finish();
}

/// Benchmark line normalization on a citation-heavy line.
fn bench_normalize(c: &mut Criterion) {
    let line = "Deep   networks 12 14 15 are widely used ( see 3,4 ) in layout analysis .";
    c.bench_function("normalize_line", |b| {
        b.iter(|| relayout::text::normalize_line(black_box(line)));
    });
}

criterion_group!(benches, bench_conversion, bench_normalize);
criterion_main!(benches);
