//! Tokenization.

use nom::{
    branch::alt,
    character::complete::char as tag_char,
    combinator::map,
    Err as NomErr, Parser as _, Slice,
};

use super::helpers::{binary_op, number, skip_ws, var_name};
use crate::{
    spans::with_span, BinaryOp, Error, ErrorKind, InputSpan, NomResult, Spanned,
};

/// Lexical token of an arithmetic expression.
#[derive(Debug, Clone, Copy, PartialEq)]
#[non_exhaustive]
pub enum Token<'a> {
    /// Number literal, e.g., `2.5e-3`.
    Number(f64),
    /// Name, e.g., `sqrt` or `ans`.
    Ident(&'a str),
    /// Binary operator. `+` and `-` may be interpreted as unary ops by the parser.
    Op(BinaryOp),
    /// `=` sign. Never valid; recognized to report keyword args in function calls.
    Eq,
    /// Opening parenthesis.
    LeftParen,
    /// Closing parenthesis.
    RightParen,
    /// Comma separating function args.
    Comma,
    /// End of input. Always the last token; its span is empty.
    End,
}

/// Token together with its span.
pub type SpannedToken<'a> = Spanned<'a, Token<'a>>;

fn token(input: InputSpan<'_>) -> NomResult<'_, Token<'_>> {
    alt((
        map(number, Token::Number),
        map(var_name, |name| Token::Ident(*name.fragment())),
        map(binary_op, |op| Token::Op(op.extra)),
        map(tag_char('('), |_| Token::LeftParen),
        map(tag_char(')'), |_| Token::RightParen),
        map(tag_char(','), |_| Token::Comma),
        map(tag_char('='), |_| Token::Eq),
    ))
    .parse(input)
}

/// Error spanning the first char of `input`.
fn invalid_token(input: InputSpan<'_>) -> Error<'_> {
    let char_len = input.fragment().chars().next().map_or(0, char::len_utf8);
    Error::new(input.slice(..char_len), ErrorKind::InvalidToken)
}

/// Splits `input` into tokens. Whitespace between tokens is skipped. The returned vector
/// always ends with [`Token::End`].
///
/// # Errors
///
/// Returns [`ErrorKind::InvalidToken`] pointing at the first character that cannot start
/// a token, or [`ErrorKind::LiteralOutOfRange`] for a number literal overflowing `f64`.
pub fn tokenize(input: InputSpan<'_>) -> Result<Vec<SpannedToken<'_>>, Error<'_>> {
    let mut tokens = vec![];
    let mut rest = skip_ws(input);
    while !rest.fragment().is_empty() {
        let (next, token) = with_span(token)(rest).map_err(|err| match err {
            NomErr::Failure(err) => err,
            NomErr::Error(_) | NomErr::Incomplete(_) => invalid_token(rest),
        })?;
        tokens.push(token);
        rest = skip_ws(next);
    }
    tokens.push(Spanned::new(rest, Token::End));
    Ok(tokens)
}
