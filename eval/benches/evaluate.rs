//! Benches for parsing and evaluation.
//!
//! Implemented benches:
//!
//! - Multiplication of `ELEMENTS` numbers: native, parsing only, evaluation of a parsed
//!   expression, and parsing + evaluation
//! - An expression with function calls and all kinds of operations
//! - Parentheses nested close to the default depth limit

use criterion::{criterion_group, criterion_main, BatchSize, Bencher, Criterion, Throughput};

use calc_eval::{evaluate, evaluate_expression, Environment};
use calc_parser::{parse, ParserOptions};

const ELEMENTS: u64 = 50;
const MIXED_EXPR: &str = "sqrt(abs(-16)) * (2 ** -1 + 7 // 2 - 7 % -3) / log(e ** 2) + sin(pi / 2)";

fn factors() -> Vec<f64> {
    (0..ELEMENTS)
        .map(|i| 0.5 + (i as f64) / (ELEMENTS as f64))
        .collect()
}

fn product_expr() -> String {
    let factors: Vec<_> = factors().into_iter().map(|x| x.to_string()).collect();
    factors.join(" * ")
}

fn bench_mul_native(bencher: &mut Bencher<'_>) {
    bencher.iter_batched(
        factors,
        |values| values.into_iter().product::<f64>(),
        BatchSize::SmallInput,
    );
}

fn bench_mul_parse(bencher: &mut Bencher<'_>) {
    let program = product_expr();
    bencher.iter(|| parse(&program).unwrap());
}

fn bench_mul_eval(bencher: &mut Bencher<'_>) {
    let program = product_expr();
    let expr = parse(&program).unwrap();
    let env = Environment::new(None);
    bencher.iter(|| env.evaluate(&expr).unwrap());
}

fn bench_mul(bencher: &mut Bencher<'_>) {
    let program = product_expr();
    bencher.iter(|| evaluate_expression(&program, None).unwrap());
}

fn bench_mixed(bencher: &mut Bencher<'_>) {
    let expr = parse(MIXED_EXPR).unwrap();
    bencher.iter(|| evaluate(&expr, Some(1.0)).unwrap());
}

fn bench_nested_parens(bencher: &mut Bencher<'_>) {
    let depth = ParserOptions::DEFAULT_MAX_DEPTH - 1;
    let program = format!("{}1{}", "(-".repeat(depth / 2), ")".repeat(depth / 2));
    bencher.iter(|| evaluate_expression(&program, None).unwrap());
}

fn bench_evaluation(criterion: &mut Criterion) {
    criterion
        .benchmark_group("mul")
        .bench_function("native", bench_mul_native)
        .bench_function("parse", bench_mul_parse)
        .bench_function("eval", bench_mul_eval)
        .bench_function("parse_eval", bench_mul)
        .throughput(Throughput::Elements(ELEMENTS));

    criterion.bench_function("mixed", bench_mixed);
    criterion.bench_function("nested_parens", bench_nested_parens);
}

criterion_group!(benches, bench_evaluation);
criterion_main!(benches);
