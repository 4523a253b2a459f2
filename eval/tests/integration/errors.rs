//! Error reporting through the public API.

use assert_matches::assert_matches;

use calc_eval::{
    evaluate_expression, AuxErrorInfo, EvalError, EvaluationError, Operation, StdFunction,
};
use calc_parser::{BinaryOp, Context, ErrorKind};

use super::{eval_error, parse_error};

#[test]
fn division_by_zero() {
    assert_eq!(
        eval_error("5/0", None),
        EvalError::DivisionByZero {
            op: Operation::Binary(BinaryOp::Div)
        }
    );
    assert_matches!(
        eval_error("5 // (ans - 1)", Some(1.0)),
        EvalError::DivisionByZero { .. }
    );
    assert_matches!(eval_error("1 % 0.0", None), EvalError::DivisionByZero { .. });
}

#[test]
fn division_by_zero_spans() {
    let err = evaluate_expression("2 * (1 / (3 - 3))", None).unwrap_err();
    assert_eq!(*err.main_span().fragment(), "1 / (3 - 3)");
    let EvaluationError::Eval(err) = err else {
        panic!("Unexpected error: {err:?}");
    };
    assert_eq!(err.aux_spans().len(), 1);
    assert_eq!(*err.aux_spans()[0].fragment(), "(3 - 3)");
    assert_eq!(err.aux_spans()[0].extra, AuxErrorInfo::ZeroDivisor);
}

#[test]
fn domain_errors() {
    assert_eq!(
        eval_error("sqrt(-1)", None),
        EvalError::DomainError {
            op: Operation::Call(StdFunction::Sqrt)
        }
    );
    assert_matches!(eval_error("log(0)", None), EvalError::DomainError { .. });
    assert_matches!(eval_error("(-1) ** 0.5", None), EvalError::DomainError { .. });
}

#[test]
fn unknown_names() {
    assert_eq!(
        eval_error("foo(1)", None),
        EvalError::UnknownFunction("foo".to_owned())
    );
    assert_eq!(eval_error("x+1", None), EvalError::UnknownName("x".to_owned()));
    assert_eq!(
        eval_error("e(1)", None),
        EvalError::UnknownFunction("e".to_owned())
    );
    assert_eq!(
        eval_error("__import__(1)", None),
        EvalError::UnknownFunction("__import__".to_owned())
    );
    assert_eq!(
        eval_error("2 * log", None),
        EvalError::NotANumber("log".to_owned())
    );
}

#[test]
fn arity_mismatch() {
    assert_eq!(
        eval_error("sqrt(1, 2)", None),
        EvalError::ArityMismatch {
            function: StdFunction::Sqrt,
            expected: 1,
            actual: 2,
        }
    );
}

#[test]
fn parse_errors() {
    assert_eq!(parse_error("(1+2"), ErrorKind::UnbalancedParens);
    assert_eq!(parse_error("1 2"), ErrorKind::TrailingInput);
    assert_eq!(parse_error("sqrt(x=9)"), ErrorKind::KeywordArgsNotAllowed);
    assert_eq!(parse_error(""), ErrorKind::EmptyExpression);
    assert_eq!(parse_error("2 ^ 3"), ErrorKind::InvalidToken);
    assert_eq!(parse_error("1e999"), ErrorKind::LiteralOutOfRange);
    assert_eq!(
        parse_error("1 +"),
        ErrorKind::UnexpectedEnd {
            context: Context::Expr
        }
    );
    assert_eq!(parse_error("x = 1"), ErrorKind::TrailingInput);
}

#[test]
fn input_ending_inside_parens() {
    for source in ["(", "(2*", "1 + (", "sqrt(", "sqrt(1,", "((1)"] {
        assert_eq!(parse_error(source), ErrorKind::UnbalancedParens, "{source}");
    }
}

#[test]
fn parse_errors_are_reported_before_evaluation() {
    // `foo` is unknown, but parsing fails first.
    assert_eq!(
        parse_error("foo(1 +)"),
        ErrorKind::UnexpectedToken {
            context: Context::FnCall
        }
    );
}

#[test]
fn error_display() {
    let err = evaluate_expression("1 +\n  sqrt(-4)", None).unwrap_err();
    assert_eq!(
        err.to_string(),
        "evaluation error at 2:3: Math domain error in function `sqrt`"
    );

    let err = evaluate_expression("(1", None).unwrap_err();
    assert_eq!(err.to_string(), "parse error at 1:1: Unbalanced parentheses");
}
