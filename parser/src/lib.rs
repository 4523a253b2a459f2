//! Tokenizer and parser for a restricted language of arithmetic expressions.
//!
//! # Supported syntax
//!
//! - **Number literals** with an optional fractional part and exponent: `2`, `2.5`, `.5`,
//!   `3.`, `1e-3`. Literals are parsed as `f64`; literals overflowing to infinity
//!   are rejected.
//! - **Names,** i.e., a sequence of ASCII alphanumeric chars and underscores that does not
//!   start with a digit: `pi`, `ans`, `_x1`. The meaning of names is defined
//!   by the evaluator.
//! - **Arithmetic operations:** `+`, `-` (binary and unary), `*`, `/`, `//` (floor division),
//!   `%` (floor remainder) and `**` (power).
//! - **Function calls** with positional args: `sqrt(9)`, `log(x, )`. Whitespace between
//!   the function name and `(` is allowed; a trailing comma is allowed as well.
//! - **Parentheses** which predictably influence operation priority.
//!
//! Everything else (assignments, comparisons, keyword args, attribute access, etc.)
//! is rejected with a descriptive [`Error`].
//!
//! # Operation priority
//!
//! From the lowest to the highest:
//!
//! 1. `+` and `-` (left-associative)
//! 2. `*`, `/`, `//` and `%` (left-associative)
//! 3. Unary `+` and `-`
//! 4. `**` (right-associative). It binds tighter than a unary op on its left, but its
//!    exponent may be a unary expression: `-2 ** 2` is `-(2 ** 2)`, and `2 ** -1` is valid.
//!
//! # Nesting limits
//!
//! Parsing untrusted input must not exhaust the stack, so the parser bounds both the nesting
//! depth of parentheses / function calls / unary ops and the height of the produced AST.
//! The two limits are configured via [`ParserOptions`]; exceeding either yields
//! [`ErrorKind::TooDeep`]. The height limit is larger by default, so that long flat
//! chains like `1 + 1 + ... + 1` with up to a thousand terms are accepted.
//!
//! # Examples
//!
//! ```
//! # use assert_matches::assert_matches;
//! use calc_parser::{parse, BinaryOp, Expr};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let expr = parse("1 + 2 * sqrt (9)")?;
//! let Expr::Binary { lhs, op, rhs } = expr.extra else {
//!     unreachable!();
//! };
//! assert_eq!(*lhs.fragment(), "1");
//! assert_eq!(op.extra, BinaryOp::Add);
//! assert_eq!(*rhs.fragment(), "2 * sqrt (9)");
//! assert_matches!(
//!     rhs.extra.binary_rhs().unwrap().extra,
//!     Expr::Function { ref name, ref args } if *name.fragment() == "sqrt" && args.len() == 1
//! );
//! # Ok(())
//! # }
//! ```
//!
//! Errors carry the span of the offending code:
//!
//! ```
//! use calc_parser::{parse, ErrorKind};
//!
//! let err = parse("sqrt(x=2)").unwrap_err();
//! assert_eq!(*err.kind(), ErrorKind::KeywordArgsNotAllowed);
//! assert_eq!(*err.span().fragment(), "x=");
//! assert_eq!(err.to_string(), "1:6: Keyword args not allowed");
//! ```

#![doc(html_root_url = "https://docs.rs/calc-parser/0.1.0")]
#![warn(missing_docs, missing_debug_implementations)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions
)]

pub use crate::{
    ast::{Expr, SpannedExpr},
    error::{Context, Error, ErrorKind},
    ops::{BinaryOp, OpPriority, UnaryOp},
    parser::{parse, parse_with_options, tokenize, ParserOptions, SpannedToken, Token},
    spans::{InputSpan, LocatedSpan, NomResult, Spanned},
};

mod ast;
mod error;
mod ops;
mod parser;
mod spans;
