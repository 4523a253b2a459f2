//! Recursive-descent parser for arithmetic expressions.

use super::{
    lexer::{SpannedToken, Token},
    ParserOptions,
};
use crate::{
    spans::unite_spans, BinaryOp, Context, Error, ErrorKind, Expr, InputSpan, OpPriority,
    Spanned, SpannedExpr, UnaryOp,
};

/// Parsed expression together with the height of its AST.
#[derive(Debug)]
struct Node<'a> {
    expr: SpannedExpr<'a>,
    height: usize,
}

type ParseResult<'a> = Result<Node<'a>, Error<'a>>;

/// Parser over a token sequence ending with [`Token::End`].
///
/// The nesting of recursive calls is bounded by `max_depth`, and the height of the produced
/// AST by `max_height`. The former protects the parser, the latter protects AST consumers
/// that traverse the tree recursively (e.g., the evaluator or `Drop` impls).
#[derive(Debug)]
pub(super) struct Parser<'a> {
    input: InputSpan<'a>,
    tokens: Vec<SpannedToken<'a>>,
    pos: usize,
    depth: usize,
    max_depth: usize,
    max_height: usize,
}

impl<'a> Parser<'a> {
    pub fn new(
        input: InputSpan<'a>,
        tokens: Vec<SpannedToken<'a>>,
        options: &ParserOptions,
    ) -> Self {
        debug_assert!(matches!(
            tokens.last().map(|token| token.extra),
            Some(Token::End)
        ));
        Self {
            input,
            tokens,
            pos: 0,
            depth: 0,
            max_depth: options.max_depth,
            max_height: options.max_height,
        }
    }

    /// Parses a complete expression; all tokens except for `End` must be consumed.
    pub fn parse(mut self) -> Result<SpannedExpr<'a>, Error<'a>> {
        if self.peek().extra == Token::End {
            let span = Spanned::new(self.input, ());
            return Err(ErrorKind::EmptyExpression.with_span(&span));
        }

        let node = self.additive(Context::Expr)?;
        let next = *self.peek();
        match next.extra {
            Token::End => Ok(node.expr),
            Token::RightParen => Err(ErrorKind::UnbalancedParens.with_span(&next)),
            _ => {
                // The last token before `End`; it exists since `next` is not `End`.
                let last = self.tokens[self.tokens.len() - 2];
                let span = unite_spans(self.input, &next, &last);
                Err(ErrorKind::TrailingInput.with_span(&span))
            }
        }
    }

    fn peek(&self) -> &SpannedToken<'a> {
        &self.tokens[self.pos]
    }

    /// Returns the current token and moves to the next one. `End` is never skipped.
    fn advance(&mut self) -> SpannedToken<'a> {
        let token = self.tokens[self.pos];
        if token.extra != Token::End {
            self.pos += 1;
        }
        token
    }

    fn enter<T>(&mut self, span: &Spanned<'a, T>) -> Result<(), Error<'a>> {
        self.depth += 1;
        if self.depth > self.max_depth {
            let max_depth = self.max_depth;
            Err(ErrorKind::TooDeep { max_depth }.with_span(span))
        } else {
            Ok(())
        }
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn node(&self, span: Spanned<'a>, height: usize, expr: Expr<'a>) -> ParseResult<'a> {
        if height > self.max_height {
            let max_depth = self.max_height;
            return Err(ErrorKind::TooDeep { max_depth }.with_span(&span));
        }
        Ok(Node {
            expr: span.copy_with_extra(expr),
            height,
        })
    }

    fn binary_node(
        &self,
        lhs: Node<'a>,
        op: Spanned<'a, BinaryOp>,
        rhs: Node<'a>,
    ) -> ParseResult<'a> {
        let span = unite_spans(self.input, &lhs.expr, &rhs.expr);
        let height = lhs.height.max(rhs.height) + 1;
        let expr = Expr::Binary {
            lhs: Box::new(lhs.expr),
            op,
            rhs: Box::new(rhs.expr),
        };
        self.node(span, height, expr)
    }

    fn additive(&mut self, context: Context) -> ParseResult<'a> {
        self.binary_chain(OpPriority::AddOrSub, context, Self::multiplicative)
    }

    fn multiplicative(&mut self, context: Context) -> ParseResult<'a> {
        self.binary_chain(OpPriority::MulOrDiv, context, Self::unary)
    }

    /// Left-associative chain of operations with the same `priority`. Folded in a loop,
    /// so the chain length only affects the AST height.
    fn binary_chain(
        &mut self,
        priority: OpPriority,
        context: Context,
        mut operand: impl FnMut(&mut Self, Context) -> ParseResult<'a>,
    ) -> ParseResult<'a> {
        let mut acc = operand(self, context)?;
        loop {
            let token = *self.peek();
            let op = match token.extra {
                Token::Op(op) if op.priority() == priority => op,
                _ => break Ok(acc),
            };
            self.advance();
            let rhs = operand(self, context)?;
            acc = self.binary_node(acc, token.copy_with_extra(op), rhs)?;
        }
    }

    fn unary(&mut self, context: Context) -> ParseResult<'a> {
        let token = *self.peek();
        let unary_op = match token.extra {
            Token::Op(op) => UnaryOp::from_binary(op),
            _ => None,
        };
        let Some(op) = unary_op else {
            return self.power(context);
        };

        self.advance();
        self.enter(&token)?;
        let inner = self.unary(context)?;
        self.leave();

        let span = unite_spans(self.input, &token, &inner.expr);
        let expr = Expr::Unary {
            op: token.copy_with_extra(op),
            inner: Box::new(inner.expr),
        };
        self.node(span, inner.height + 1, expr)
    }

    /// `primary ('**' unary)?`. The exponent is parsed as a unary expression, which makes
    /// the operation right-associative and allows exponents like `2 ** -1`.
    fn power(&mut self, context: Context) -> ParseResult<'a> {
        let base = self.primary(context)?;
        let token = *self.peek();
        if token.extra != Token::Op(BinaryOp::Power) {
            return Ok(base);
        }

        self.advance();
        self.enter(&token)?;
        let exponent = self.unary(context)?;
        self.leave();
        self.binary_node(base, token.copy_with_extra(BinaryOp::Power), exponent)
    }

    fn primary(&mut self, context: Context) -> ParseResult<'a> {
        let token = self.advance();
        match token.extra {
            Token::Number(value) => self.node(token.with_no_extra(), 1, Expr::Literal(value)),
            Token::Ident(_) => {
                if self.peek().extra == Token::LeftParen {
                    self.call(token)
                } else {
                    let name = token.with_no_extra();
                    self.node(name, 1, Expr::Variable(name))
                }
            }
            Token::LeftParen => self.paren(token),
            Token::End => Err(ErrorKind::UnexpectedEnd { context }.with_span(&token)),
            Token::RightParen if context == Context::Expr => {
                Err(ErrorKind::UnbalancedParens.with_span(&token))
            }
            _ => Err(ErrorKind::UnexpectedToken { context }.with_span(&token)),
        }
    }

    /// Parenthesized expression. The returned expression spans the parentheses as well.
    fn paren(&mut self, open: SpannedToken<'a>) -> ParseResult<'a> {
        self.enter(&open)?;
        let inner = self
            .additive(Context::Paren)
            .map_err(|err| unclosed_paren(err, &open))?;
        self.leave();

        let close = self.advance();
        match close.extra {
            Token::RightParen => {
                let span = unite_spans(self.input, &open, &close);
                Ok(Node {
                    expr: span.copy_with_extra(inner.expr.extra),
                    height: inner.height,
                })
            }
            Token::End => Err(ErrorKind::UnbalancedParens.with_span(&open)),
            _ => Err(ErrorKind::UnexpectedToken {
                context: Context::Paren,
            }
            .with_span(&close)),
        }
    }

    /// Function call `name(arg, ...)` with an optional trailing comma.
    fn call(&mut self, name: SpannedToken<'a>) -> ParseResult<'a> {
        let open = self.advance();
        self.enter(&open)?;

        let mut args = vec![];
        let mut height = 0;
        let close = loop {
            if self.peek().extra == Token::RightParen {
                break self.advance();
            }

            let arg = self
                .additive(Context::FnCall)
                .map_err(|err| unclosed_paren(err, &open))?;
            height = height.max(arg.height);
            let next = self.advance();
            match next.extra {
                Token::Comma => args.push(arg.expr),
                Token::RightParen => {
                    args.push(arg.expr);
                    break next;
                }
                Token::Eq if matches!(arg.expr.extra, Expr::Variable(_)) => {
                    let span = unite_spans(self.input, &arg.expr, &next);
                    return Err(ErrorKind::KeywordArgsNotAllowed.with_span(&span));
                }
                Token::End => return Err(ErrorKind::UnbalancedParens.with_span(&open)),
                _ => {
                    let context = Context::FnCall;
                    return Err(ErrorKind::UnexpectedToken { context }.with_span(&next));
                }
            }
        };
        self.leave();

        let span = unite_spans(self.input, &name, &close);
        let expr = Expr::Function {
            name: name.with_no_extra(),
            args,
        };
        self.node(span, height + 1, expr)
    }
}

/// Input ending inside parentheses is reported as unbalanced parens at the innermost
/// unclosed `(`, rather than as a missing operand.
fn unclosed_paren<'a>(err: Error<'a>, open: &SpannedToken<'a>) -> Error<'a> {
    if matches!(err.kind(), ErrorKind::UnexpectedEnd { .. }) {
        ErrorKind::UnbalancedParens.with_span(open)
    } else {
        err
    }
}
