//! Error handling.

use nom::{
    error::{ErrorKind as NomErrorKind, ParseError},
    Slice,
};

use core::fmt;

use crate::{InputSpan, Spanned};

/// Parsing context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Context {
    /// Arithmetic expression.
    Expr,
    /// Function call arguments.
    FnCall,
    /// Expression in parentheses.
    Paren,
}

impl fmt::Display for Context {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(match self {
            Self::Expr => "arithmetic expression",
            Self::FnCall => "function call",
            Self::Paren => "parenthesized expression",
        })
    }
}

/// Parsing error kind.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// No token starts with this character.
    InvalidToken,
    /// Input is empty or consists of whitespace only.
    EmptyExpression,
    /// Opening parenthesis is not closed, or a closing one is not opened.
    UnbalancedParens,
    /// Leftover tokens after a complete expression.
    TrailingInput,
    /// `name=value` argument in a function call.
    KeywordArgsNotAllowed,
    /// Expression nesting or AST height exceeds the limit set in
    /// [`ParserOptions`](crate::ParserOptions).
    TooDeep {
        /// Exceeded limit: either the max nesting depth or the max AST height.
        max_depth: usize,
    },
    /// Token cannot appear at this position.
    UnexpectedToken {
        /// Parsing context.
        context: Context,
    },
    /// Input ends where an operand is expected.
    UnexpectedEnd {
        /// Parsing context.
        context: Context,
    },
    /// Numeric literal does not fit into a finite `f64`.
    LiteralOutOfRange,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidToken => formatter.write_str("Invalid token"),
            Self::EmptyExpression => formatter.write_str("Empty expression"),
            Self::UnbalancedParens => formatter.write_str("Unbalanced parentheses"),
            Self::TrailingInput => formatter.write_str("Uninterpreted input after expression"),
            Self::KeywordArgsNotAllowed => formatter.write_str("Keyword args not allowed"),
            Self::TooDeep { max_depth } => write!(
                formatter,
                "Expression is nested too deeply (limit is {max_depth})"
            ),
            Self::UnexpectedToken { context } => write!(formatter, "Unexpected token in {context}"),
            Self::UnexpectedEnd { context } => write!(formatter, "Unfinished {context}"),
            Self::LiteralOutOfRange => formatter.write_str("Number literal is out of range"),
        }
    }
}

impl ErrorKind {
    /// Returns optional error context.
    pub fn context(&self) -> Option<Context> {
        match self {
            Self::UnexpectedToken { context } | Self::UnexpectedEnd { context } => Some(*context),
            _ => None,
        }
    }

    /// Returns a short description of the spanned information.
    pub fn main_span_info(&self) -> &'static str {
        match self {
            Self::InvalidToken => "Unrecognized character",
            Self::EmptyExpression => "Nothing to evaluate",
            Self::UnbalancedParens => "Unmatched parenthesis",
            Self::TrailingInput => "Expected end of expression",
            Self::KeywordArgsNotAllowed => "Named argument",
            Self::TooDeep { .. } => "Nesting limit reached here",
            Self::UnexpectedToken { .. } => "Unexpected token",
            Self::UnexpectedEnd { .. } => "Expected an operand",
            Self::LiteralOutOfRange => "Literal overflows",
        }
    }

    /// Returns information helping fix the error.
    pub fn help(&self) -> Option<&'static str> {
        Some(match self {
            Self::InvalidToken => {
                "Expressions may contain numbers, names, `+ - * / // % **`, parentheses and commas"
            }
            Self::KeywordArgsNotAllowed => "Pass arguments by position, e.g., `sqrt(9)`",
            Self::TrailingInput => {
                "Only a single expression is allowed; use an operator to combine values"
            }
            _ => return None,
        })
    }

    pub(crate) fn with_span<'a, T>(self, span: &Spanned<'a, T>) -> Error<'a> {
        Error {
            inner: span.copy_with_extra(self),
        }
    }
}

/// Parsing error with the associated code span.
#[derive(Debug, Clone)]
pub struct Error<'a> {
    inner: Spanned<'a, ErrorKind>,
}

impl<'a> Error<'a> {
    pub(crate) fn new(span: InputSpan<'a>, kind: ErrorKind) -> Self {
        Self {
            inner: Spanned::new(span, kind),
        }
    }

    /// Returns the kind of this error.
    pub fn kind(&self) -> &ErrorKind {
        &self.inner.extra
    }

    /// Returns the span of this error.
    pub fn span(&self) -> Spanned<'a> {
        self.inner.with_no_extra()
    }
}

impl fmt::Display for Error<'_> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "{}:{}: {}",
            self.inner.location_line(),
            self.inner.get_column(),
            self.inner.extra
        )
    }
}

impl std::error::Error for Error<'_> {}

impl<'a> ParseError<InputSpan<'a>> for Error<'a> {
    fn from_error_kind(input: InputSpan<'a>, _kind: NomErrorKind) -> Self {
        // Truncate the error span to the first ineligible char.
        let char_len = input.fragment().chars().next().map_or(0, char::len_utf8);
        Error::new(input.slice(..char_len), ErrorKind::InvalidToken)
    }

    fn append(_: InputSpan<'a>, _: NomErrorKind, other: Self) -> Self {
        other
    }
}
