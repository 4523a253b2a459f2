//! Integration tests for parsing and evaluation.

use assert_matches::assert_matches;

use calc_eval::{evaluate_expression, EvalError, EvaluationError, Session};
use calc_parser::ErrorKind;

mod errors;
mod nesting;

fn eval(source: &str) -> f64 {
    evaluate_expression(source, None)
        .unwrap_or_else(|err| panic!("Failed evaluating `{source}`: {err}"))
}

fn eval_error(source: &str, previous: Option<f64>) -> EvalError {
    match evaluate_expression(source, previous) {
        Err(EvaluationError::Eval(err)) => err.kind().clone(),
        other => panic!("Unexpected outcome for `{source}`: {other:?}"),
    }
}

fn parse_error(source: &str) -> ErrorKind {
    match evaluate_expression(source, None) {
        Err(EvaluationError::Parse(err)) => err.kind().clone(),
        other => panic!("Unexpected outcome for `{source}`: {other:?}"),
    }
}

#[test]
fn operation_priority_and_associativity() {
    assert_eq!(eval("2+3*4"), 14.0);
    assert_eq!(eval("2**3**2"), 512.0);
    assert_eq!(eval("10-2-3"), 5.0);
    assert_eq!(eval("64 / 4 / 2"), 8.0);
    assert_eq!(eval("-2**2"), -4.0);
    assert_eq!(eval("2**-1"), 0.5);
    assert_eq!(eval("(2 + 3) * 4"), 20.0);
    assert_eq!(eval("  2 *\n 3  "), 6.0);
}

#[test]
fn division_ops() {
    assert_eq!(eval("5/2"), 2.5);
    assert_eq!(eval("5//2"), 2.0);
    assert_eq!(eval("5%2"), 1.0);
    assert_eq!(eval("5.5 % 2"), 1.5);
}

#[test]
fn floor_semantics_for_negative_operands() {
    assert_eq!(eval("-7//2"), -4.0);
    assert_eq!(eval("-7%2"), 1.0);
    assert_eq!(eval("7%-2"), -1.0);
    assert_eq!(eval("7//-2"), -4.0);
    assert_eq!(eval("-7//-2"), 3.0);
    assert_eq!(eval("-7%-2"), -1.0);
}

#[test]
fn functions_and_constants() {
    assert_eq!(eval("sqrt(9)"), 3.0);
    assert_eq!(eval("sqrt (9, )"), 3.0);
    assert_eq!(eval("abs(-2.5)"), 2.5);
    assert_eq!(eval("cos(0)"), 1.0);
    assert_eq!(eval("log(1)"), 0.0);
    assert_eq!(eval("exp(0)"), 1.0);
    assert_eq!(eval("pi"), std::f64::consts::PI);
    assert_eq!(eval("e"), std::f64::consts::E);
    assert!(eval("sin(pi)").abs() < 1e-15);
    assert!((eval("log(e ** 3)") - 3.0).abs() < 1e-15);
}

#[test]
fn previous_result() {
    assert_eq!(evaluate_expression("1+1", None).unwrap(), 2.0);
    assert_eq!(evaluate_expression("ans*2", Some(2.0)).unwrap(), 4.0);
    assert_eq!(
        eval_error("ans", None),
        EvalError::UnknownName("ans".to_owned())
    );
}

#[test]
fn session_updates_only_on_success() {
    let mut session = Session::new();
    let outcomes: Vec<_> = ["1 + 1", "ans * 3", "ans / 0", "x", "ans - 1", "(", "ans"]
        .into_iter()
        .map(|source| session.evaluate(source).ok())
        .collect();
    assert_eq!(
        outcomes,
        [Some(2.0), Some(6.0), None, None, Some(5.0), None, Some(5.0)]
    );
}

#[test]
fn evaluation_is_idempotent() {
    let sources = ["2 ** 0.5", "ans + 1", "1 / (ans - 3)", "foo(1)", "sqrt(1"];
    for source in sources {
        for previous in [None, Some(3.0)] {
            let first = evaluate_expression(source, previous);
            let second = evaluate_expression(source, previous);
            match (first, second) {
                (Ok(first), Ok(second)) => assert_eq!(first, second),
                (Err(EvaluationError::Parse(first)), Err(EvaluationError::Parse(second))) => {
                    assert_eq!(first.kind(), second.kind());
                    assert_eq!(first.span(), second.span());
                }
                (Err(EvaluationError::Eval(first)), Err(EvaluationError::Eval(second))) => {
                    assert_eq!(first.kind(), second.kind());
                }
                (first, second) => panic!("Outcomes differ: {first:?}, {second:?}"),
            }
        }
    }
}

#[test]
fn successful_results_are_finite() {
    let sources = ["1e308 * 10", "exp(710)", "10 ** 309", "1e308 + 1e308", "1e-300 ** -2"];
    for source in sources {
        assert_matches!(
            eval_error(source, None),
            EvalError::Overflow { .. },
            "{source}"
        );
    }
}

#[test]
fn concurrent_evaluation() {
    let sources: Vec<_> = (0..8).map(|i| format!("{i} ** 2 + ans")).collect();
    std::thread::scope(|scope| {
        let handles: Vec<_> = sources
            .iter()
            .enumerate()
            .map(|(i, source)| {
                scope.spawn(move || {
                    let value = evaluate_expression(source, Some(1.0)).unwrap();
                    assert_eq!(value, (i * i + 1) as f64);
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
    });
}
