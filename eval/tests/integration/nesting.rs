//! Deeply nested expressions must fail gracefully rather than overflow the stack.

use assert_matches::assert_matches;

use calc_eval::{evaluate_expression, evaluate_expression_with_options, EvaluationError};
use calc_parser::{ErrorKind, ParserOptions};

fn assert_too_deep(source: &str) {
    let err = evaluate_expression(source, None).unwrap_err();
    assert_matches!(
        err,
        EvaluationError::Parse(ref err) if matches!(err.kind(), ErrorKind::TooDeep { .. })
    );
}

#[test]
fn deeply_nested_parens() {
    let source = format!("{}1{}", "(".repeat(10_000), ")".repeat(10_000));
    assert_too_deep(&source);
}

#[test]
fn long_unary_chain() {
    let source = format!("{}1", "-".repeat(10_000));
    assert_too_deep(&source);
}

#[test]
fn deeply_nested_calls() {
    let source = format!("{}1{}", "abs(".repeat(10_000), ")".repeat(10_000));
    assert_too_deep(&source);
}

#[test]
fn long_binary_chains() {
    let source = vec!["1"; 10_000].join(" + ");
    assert_too_deep(&source);
    let source = vec!["1"; 10_000].join(" ** ");
    assert_too_deep(&source);
}

#[test]
fn moderately_nested_exprs_are_fine() {
    let source = format!("{}1{}", "(".repeat(100), ")".repeat(100));
    assert_eq!(evaluate_expression(&source, None).unwrap(), 1.0);
    let source = format!("{}2", "-".repeat(100));
    assert_eq!(evaluate_expression(&source, None).unwrap(), 2.0);
    let source = vec!["1"; 200].join(" + ");
    assert_eq!(evaluate_expression(&source, None).unwrap(), 200.0);
}

#[test]
fn long_flat_sums_are_fine() {
    let source = vec!["1"; 1_000].join(" + ");
    assert_eq!(evaluate_expression(&source, None).unwrap(), 1_000.0);
    let source = vec!["10"; 1_000].join(" * ");
    assert_matches!(
        evaluate_expression(&source, None),
        Err(EvaluationError::Eval(_))
    );
}

#[test]
fn custom_depth_limit() {
    let options = ParserOptions::default().with_max_depth(16);
    let source = format!("{}1{}", "(".repeat(20), ")".repeat(20));
    assert_eq!(evaluate_expression(&source, None).unwrap(), 1.0);
    let err = evaluate_expression_with_options(&source, None, &options).unwrap_err();
    assert_matches!(
        err,
        EvaluationError::Parse(ref err) if *err.kind() == ErrorKind::TooDeep { max_depth: 16 }
    );
}
