//! Restricted evaluator for arithmetic expressions parsed by [`calc-parser`].
//!
//! # How it works
//!
//! 1. An expression is parsed into a [`SpannedExpr`](calc_parser::SpannedExpr).
//!    The parser bounds the height of the tree, so evaluation cannot exhaust the stack.
//! 2. An [`Environment`] is built from a static whitelist of [functions](StdFunction) and
//!    constants, plus the previous result bound to `ans` (if provided). The environment
//!    is never extended by the evaluated code.
//! 3. The tree is reduced bottom-up to a finite `f64` or an [`EvalError`] together with
//!    the relevant code spans.
//!
//! # Semantics
//!
//! - Numbers are `f64`. Every successful result is finite; an operation on finite operands
//!   producing an infinite value fails with [`EvalError::Overflow`], and one producing
//!   NaN fails with [`EvalError::DomainError`].
//! - `/` is true division; `//` and `%` are floor division and floor remainder,
//!   e.g., `-7 // 2 == -4` and `-7 % 2 == 1`. All three fail on a zero divisor.
//! - `**` raises a number to a real power. A negative number cannot be raised to
//!   a fractional power, and zero cannot be raised to a negative power.
//! - Function args are evaluated left to right before the arity is checked.
//!   Calling anything except a whitelisted function fails with [`EvalError::UnknownFunction`].
//!
//! # Examples
//!
//! ```
//! use calc_eval::{evaluate_expression, EvalError, EvaluationError};
//!
//! assert_eq!(evaluate_expression("2 + 3 * 4", None).unwrap(), 14.0);
//! assert_eq!(evaluate_expression("ans * 2", Some(2.0)).unwrap(), 4.0);
//! assert_eq!(evaluate_expression("-7 // 2", None).unwrap(), -4.0);
//!
//! let err = evaluate_expression("sqrt(-1)", None).unwrap_err();
//! let EvaluationError::Eval(err) = err else {
//!     unreachable!();
//! };
//! assert!(matches!(err.kind(), EvalError::DomainError { .. }));
//! assert_eq!(*err.main_span().fragment(), "sqrt(-1)");
//! ```
//!
//! [`calc-parser`]: calc_parser

#![doc(html_root_url = "https://docs.rs/calc-eval/0.1.0")]
#![warn(missing_docs, missing_debug_implementations)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions
)]

use calc_parser::ParserOptions;

pub use self::{
    env::{Binding, Environment, ANS},
    error::{AuxErrorInfo, EvalError, EvaluationError, Operation, SpannedEvalError},
    exec::{evaluate, EvalResult},
    fns::StdFunction,
    session::Session,
};

pub mod arith;
pub mod env;
pub mod error;
mod exec;
mod fns;
mod session;

/// Parses and evaluates `source` with the default [`ParserOptions`]. `previous` is
/// the previous successful result; if present, it is bound to [`ANS`].
///
/// # Errors
///
/// Returns a parsing error or an evaluation error, each carrying the span
/// of the offending code.
pub fn evaluate_expression(
    source: &str,
    previous: Option<f64>,
) -> Result<f64, EvaluationError<'_>> {
    evaluate_expression_with_options(source, previous, &ParserOptions::default())
}

/// Parses and evaluates `source` with the specified parser options.
///
/// # Errors
///
/// Returns a parsing error or an evaluation error, each carrying the span
/// of the offending code.
pub fn evaluate_expression_with_options<'a>(
    source: &'a str,
    previous: Option<f64>,
    options: &ParserOptions,
) -> Result<f64, EvaluationError<'a>> {
    let expr = calc_parser::parse_with_options(source, options)?;
    Ok(evaluate(&expr, previous)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn core_types_are_send_and_sync() {
        assert_send_sync::<Environment>();
        assert_send_sync::<Session>();
        assert_send_sync::<EvaluationError<'static>>();
        assert_send_sync::<calc_parser::SpannedExpr<'static>>();
    }
}
