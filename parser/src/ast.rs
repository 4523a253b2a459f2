//! `Expr` and tightly related types.

use crate::{
    ops::{BinaryOp, UnaryOp},
    spans::Spanned,
};

/// Arithmetic expression. The set of variants is closed, so consumers can match on it
/// exhaustively.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr<'a> {
    /// Numeric literal, e.g., `2.5`.
    Literal(f64),
    /// Name reference, e.g., `pi`. The enclosed span covers the name only, while the span
    /// of the expression may include enclosing parentheses.
    Variable(Spanned<'a>),
    /// Unary operation, e.g., `-x`.
    Unary {
        /// Operator.
        op: Spanned<'a, UnaryOp>,
        /// Inner expression.
        inner: Box<SpannedExpr<'a>>,
    },
    /// Binary operation, e.g., `x + 1`.
    Binary {
        /// LHS of the operation.
        lhs: Box<SpannedExpr<'a>>,
        /// Operator.
        op: Spanned<'a, BinaryOp>,
        /// RHS of the operation.
        rhs: Box<SpannedExpr<'a>>,
    },
    /// Function call, e.g., `sqrt(9)`.
    Function {
        /// Function name, e.g., `sqrt` in `sqrt(9)`.
        name: Spanned<'a>,
        /// Function arguments.
        args: Vec<SpannedExpr<'a>>,
    },
}

impl<'a> Expr<'a> {
    /// Returns LHS of the binary expression. If this is not a binary expression, returns `None`.
    pub fn binary_lhs(&self) -> Option<&SpannedExpr<'a>> {
        match self {
            Expr::Binary { lhs, .. } => Some(lhs),
            _ => None,
        }
    }

    /// Returns RHS of the binary expression. If this is not a binary expression, returns `None`.
    pub fn binary_rhs(&self) -> Option<&SpannedExpr<'a>> {
        match self {
            Expr::Binary { rhs, .. } => Some(rhs),
            _ => None,
        }
    }
}

/// `Expr` with the associated code span.
pub type SpannedExpr<'a> = Spanned<'a, Expr<'a>>;
