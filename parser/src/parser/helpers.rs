//! Lexing helpers.

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while, take_while1, take_while_m_n},
    character::complete::{char as tag_char, digit0, digit1, one_of},
    combinator::{opt, peek, recognize},
    sequence::{pair, preceded, tuple},
    Err as NomErr, Parser as _,
};

use crate::{BinaryOp, Error, ErrorKind, InputSpan, NomResult, Spanned};

impl BinaryOp {
    pub(super) fn from_span(span: InputSpan<'_>) -> Spanned<'_, Self> {
        Spanned::new(
            span,
            match *span.fragment() {
                "+" => Self::Add,
                "-" => Self::Sub,
                "*" => Self::Mul,
                "/" => Self::Div,
                "//" => Self::FloorDiv,
                "%" => Self::Mod,
                "**" => Self::Power,
                _ => unreachable!(),
            },
        )
    }
}

/// Whitespace.
pub(super) fn ws(input: InputSpan<'_>) -> NomResult<'_, InputSpan<'_>> {
    take_while(char::is_whitespace)(input)
}

/// Skips whitespace at the start of `input`.
pub(super) fn skip_ws(input: InputSpan<'_>) -> InputSpan<'_> {
    ws(input).map_or(input, |(rest, _)| rest)
}

/// Name: `[A-Za-z_][A-Za-z0-9_]*`.
pub(super) fn var_name(input: InputSpan<'_>) -> NomResult<'_, InputSpan<'_>> {
    preceded(
        peek(take_while_m_n(1, 1, |c: char| {
            c.is_ascii_alphabetic() || c == '_'
        })),
        take_while1(|c: char| c.is_ascii_alphanumeric() || c == '_'),
    )(input)
}

/// Unsigned decimal literal: `1`, `1.`, `1.5`, `.5`, each with an optional exponent
/// such as `e-3`.
pub(super) fn number_literal(input: InputSpan<'_>) -> NomResult<'_, InputSpan<'_>> {
    let mantissa = alt((
        recognize(pair(digit1, opt(pair(tag_char('.'), digit0)))),
        recognize(pair(tag_char('.'), digit1)),
    ));
    let exponent = tuple((one_of("eE"), opt(one_of("+-")), digit1));
    recognize(pair(mantissa, opt(exponent))).parse(input)
}

/// Number literal converted to `f64`. Literals overflowing to infinity are rejected.
pub(super) fn number(input: InputSpan<'_>) -> NomResult<'_, f64> {
    let (rest, literal) = number_literal(input)?;
    match literal.fragment().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok((rest, value)),
        _ => Err(NomErr::Failure(Error::new(
            literal,
            ErrorKind::LiteralOutOfRange,
        ))),
    }
}

/// Binary operator. Two-char operators are matched before their one-char prefixes.
pub(super) fn binary_op(input: InputSpan<'_>) -> NomResult<'_, Spanned<'_, BinaryOp>> {
    let ops = alt((
        tag("**"),
        tag("//"),
        tag("+"),
        tag("-"),
        tag("*"),
        tag("/"),
        tag("%"),
    ));
    ops.map(BinaryOp::from_span).parse(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn var_name_works() {
        let input = InputSpan::new("sqrt(2)");
        let (rest, name) = var_name(input).unwrap();
        assert_eq!(*name.fragment(), "sqrt");
        assert_eq!(*rest.fragment(), "(2)");

        let input = InputSpan::new("_x1 + 2");
        let (_, name) = var_name(input).unwrap();
        assert_eq!(*name.fragment(), "_x1");

        assert!(var_name(InputSpan::new("1x")).is_err());
    }

    #[test]
    fn number_literals() {
        let samples = [
            ("1", 1.0, ""),
            ("1.", 1.0, ""),
            ("1.5 + 2", 1.5, " + 2"),
            (".5", 0.5, ""),
            ("2e3", 2000.0, ""),
            ("2.5E-1)", 0.25, ")"),
            ("1e+2", 100.0, ""),
            ("1e", 1.0, "e"),
            ("3x", 3.0, "x"),
        ];
        for (code, expected, expected_rest) in samples {
            let (rest, value) = number(InputSpan::new(code)).unwrap();
            assert_eq!(value, expected, "{code}");
            assert_eq!(*rest.fragment(), expected_rest, "{code}");
        }
    }

    #[test]
    fn huge_number_literal() {
        let err = number(InputSpan::new("1e400 + 1")).unwrap_err();
        let NomErr::Failure(err) = err else {
            panic!("unexpected error: {err:?}");
        };
        assert_eq!(*err.kind(), ErrorKind::LiteralOutOfRange);
        assert_eq!(*err.span().fragment(), "1e400");
    }

    #[test]
    fn tiny_number_literal_underflows_to_zero() {
        let (_, value) = number(InputSpan::new("1e-400")).unwrap();
        assert_eq!(value, 0.0);
    }

    #[test]
    fn binary_ops_prefer_longest_match() {
        let samples = [
            ("**", BinaryOp::Power),
            ("*", BinaryOp::Mul),
            ("//", BinaryOp::FloorDiv),
            ("/", BinaryOp::Div),
            ("%", BinaryOp::Mod),
            ("+", BinaryOp::Add),
            ("-", BinaryOp::Sub),
        ];
        for (code, expected) in samples {
            let (rest, op) = binary_op(InputSpan::new(code)).unwrap();
            assert_eq!(op.extra, expected);
            assert_eq!(*op.fragment(), code);
            assert!(rest.fragment().is_empty());
        }

        let (rest, op) = binary_op(InputSpan::new("***")).unwrap();
        assert_eq!(op.extra, BinaryOp::Power);
        assert_eq!(*rest.fragment(), "*");
    }
}
