//! Tokenizer benchmarks.
//! Run with: `cargo bench --package expr-lex`

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use expr_lex::tokenize;
use expr_util::default_dialect;

fn token_count(source: &str) -> usize {
    let dialect = default_dialect();
    tokenize(source, &dialect).map(|t| t.len()).unwrap_or(0)
}

fn bench_lexer_arithmetic(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_arithmetic");

    let source = "1 + 2 * (3 - 4) / 5 % 6";
    group.throughput(Throughput::Bytes(source.len() as u64));

    group.bench_function("simple_expression", |b| {
        b.iter(|| token_count(black_box("1 + 2 * 3")))
    });

    group.bench_function("parenthesized_expression", |b| {
        b.iter(|| token_count(black_box(source)))
    });

    group.finish();
}

fn bench_lexer_functions(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_functions");

    let source = "outer(inner(a, b, c), d, f(g(1, 2), 3))";
    group.throughput(Throughput::Bytes(source.len() as u64));

    group.bench_function("nested_calls", |b| b.iter(|| token_count(black_box(source))));

    group.finish();
}

fn bench_lexer_keyword_operators(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_keyword_operators");

    group.bench_function("boolean_chain", |b| {
        b.iter(|| token_count(black_box("a and not b or c and d")))
    });

    group.finish();
}

fn bench_lexer_strings(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_strings");

    group.bench_function("short_string", |b| {
        b.iter(|| token_count(black_box("f(\"hello\")")))
    });

    group.bench_function("long_string", |b| {
        let source =
            "f(\"This is a longer string literal used to measure escape-decoding overhead.\")";
        b.iter(|| token_count(black_box(source)))
    });

    group.finish();
}

fn bench_lexer_numbers(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_numbers");

    group.bench_function("integer", |b| b.iter(|| token_count(black_box("123456"))));
    group.bench_function("float", |b| b.iter(|| token_count(black_box("3.14159"))));
    group.bench_function("exponent", |b| b.iter(|| token_count(black_box("6.022e23"))));

    group.finish();
}

criterion_group!(
    benches,
    bench_lexer_arithmetic,
    bench_lexer_functions,
    bench_lexer_keyword_operators,
    bench_lexer_strings,
    bench_lexer_numbers
);
criterion_main!(benches);
