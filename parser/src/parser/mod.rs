//! Tokenizer and parser for arithmetic expressions.

mod expr;
mod helpers;
mod lexer;
#[cfg(test)]
mod tests;

pub use self::lexer::{tokenize, SpannedToken, Token};

use self::expr::Parser;
use crate::{Error, InputSpan, SpannedExpr};

/// Parser options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct ParserOptions {
    /// Maximum nesting depth of parentheses, function calls, unary ops and power exponents.
    pub max_depth: usize,
    /// Maximum height of the produced AST. Unlike [`Self::max_depth`], this limit also
    /// applies to flat chains of binary ops such as `1 + 2 + ... + 1000`, since each op
    /// in a chain adds a level to the tree. Defaults to a larger value than `max_depth`
    /// because such chains are folded without recursion.
    pub max_height: usize,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl ParserOptions {
    /// Default value of [`Self::max_depth`].
    pub const DEFAULT_MAX_DEPTH: usize = 256;
    /// Default value of [`Self::max_height`].
    pub const DEFAULT_MAX_HEIGHT: usize = 1_024;

    /// Creates options with the default values.
    pub const fn new() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
            max_height: Self::DEFAULT_MAX_HEIGHT,
        }
    }

    /// Sets the maximum nesting depth.
    #[must_use]
    pub const fn with_max_depth(self, max_depth: usize) -> Self {
        Self { max_depth, ..self }
    }

    /// Sets the maximum AST height.
    #[must_use]
    pub const fn with_max_height(self, max_height: usize) -> Self {
        Self { max_height, ..self }
    }
}

/// Parses an expression with the default [`ParserOptions`].
///
/// # Errors
///
/// Returns an error if the input cannot be tokenized or is not a single valid expression.
pub fn parse(source: &str) -> Result<SpannedExpr<'_>, Error<'_>> {
    parse_with_options(source, &ParserOptions::default())
}

/// Parses an expression with the specified options.
///
/// # Errors
///
/// Returns an error if the input cannot be tokenized or is not a single valid expression.
pub fn parse_with_options<'a>(
    source: &'a str,
    options: &ParserOptions,
) -> Result<SpannedExpr<'a>, Error<'a>> {
    let input = InputSpan::new(source);
    let tokens = tokenize(input)?;
    Parser::new(input, tokens, options).parse()
}
