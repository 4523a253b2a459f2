//! Evaluation of parsed expressions.

use calc_parser::{BinaryOp, Expr, Spanned, SpannedExpr, UnaryOp};

use crate::{
    arith,
    env::{Binding, Environment},
    error::{AuxErrorInfo, EvalError, Operation, SpannedEvalError},
    fns::StdFunction,
};

/// Result of evaluating an expression.
pub type EvalResult<'a> = Result<f64, SpannedEvalError<'a>>;

impl Environment {
    /// Evaluates a parsed expression in this environment.
    ///
    /// Evaluation is a pure function of the expression and the environment. The recursion
    /// depth equals the height of the expression tree, which is bounded by the parser.
    ///
    /// # Errors
    ///
    /// Returns an error if the expression refers to an unknown name or function, calls
    /// a function with a wrong number of args, or if an arithmetic operation fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use calc_eval::{Environment, EvalError};
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let expr = calc_parser::parse("ans * sqrt(16)")?;
    /// assert_eq!(Environment::new(Some(2.5)).evaluate(&expr)?, 10.0);
    ///
    /// let err = Environment::new(None).evaluate(&expr).unwrap_err();
    /// assert_eq!(*err.kind(), EvalError::UnknownName("ans".to_owned()));
    /// assert_eq!(*err.main_span().fragment(), "ans");
    /// # Ok(())
    /// # }
    /// ```
    pub fn evaluate<'a>(&self, expr: &SpannedExpr<'a>) -> EvalResult<'a> {
        match &expr.extra {
            Expr::Literal(value) => Ok(*value),
            Expr::Variable(name) => self.evaluate_name(name),
            Expr::Unary { op, inner } => {
                let value = self.evaluate(inner)?;
                Ok(match op.extra {
                    UnaryOp::Plus => value,
                    UnaryOp::Minus => -value,
                })
            }
            Expr::Binary { lhs, op, rhs } => self.evaluate_binary(expr, lhs, op, rhs),
            Expr::Function { name, args } => self.evaluate_call(expr, name, args),
        }
    }

    fn evaluate_name<'a>(&self, name: &Spanned<'a>) -> EvalResult<'a> {
        let name_str = *name.fragment();
        match self.get(name_str) {
            Some(Binding::Number(value)) => Ok(value),
            Some(Binding::Function(_)) => Err(SpannedEvalError::new(
                name,
                EvalError::NotANumber(name_str.to_owned()),
            )),
            None => Err(SpannedEvalError::new(
                name,
                EvalError::UnknownName(name_str.to_owned()),
            )),
        }
    }

    fn evaluate_binary<'a>(
        &self,
        expr: &SpannedExpr<'a>,
        lhs: &SpannedExpr<'a>,
        op: &Spanned<'a, BinaryOp>,
        rhs: &SpannedExpr<'a>,
    ) -> EvalResult<'a> {
        let lhs_value = self.evaluate(lhs)?;
        let rhs_value = self.evaluate(rhs)?;

        arith::binary_op(op.extra, lhs_value, rhs_value).map_err(|err| {
            let err = EvalError::arithmetic(err, Operation::Binary(op.extra));
            let err = SpannedEvalError::new(expr, err);
            if op.extra.is_division() && rhs_value == 0.0 {
                err.with_span(rhs, AuxErrorInfo::ZeroDivisor)
            } else {
                err.with_span(lhs, AuxErrorInfo::Operand(lhs_value))
                    .with_span(rhs, AuxErrorInfo::Operand(rhs_value))
            }
        })
    }

    fn evaluate_call<'a>(
        &self,
        expr: &SpannedExpr<'a>,
        name: &Spanned<'a>,
        args: &[SpannedExpr<'a>],
    ) -> EvalResult<'a> {
        let function = match self.get(name.fragment()) {
            Some(Binding::Function(function)) => function,
            _ => {
                let err = EvalError::UnknownFunction((*name.fragment()).to_owned());
                return Err(SpannedEvalError::new(name, err));
            }
        };

        let arg_values = args
            .iter()
            .map(|arg| self.evaluate(arg))
            .collect::<Result<Vec<_>, _>>()?;
        let [arg] = check_arity(function, &arg_values, expr)?;

        function.apply(arg).map_err(|err| {
            let err = EvalError::arithmetic(err, Operation::Call(function));
            SpannedEvalError::new(expr, err).with_span(&args[0], AuxErrorInfo::Arg(arg))
        })
    }
}

fn check_arity<'a>(
    function: StdFunction,
    args: &[f64],
    call_expr: &SpannedExpr<'a>,
) -> Result<[f64; 1], SpannedEvalError<'a>> {
    args.try_into().map_err(|_| {
        let err = EvalError::ArityMismatch {
            function,
            expected: function.arity(),
            actual: args.len(),
        };
        SpannedEvalError::new(call_expr, err)
    })
}

/// Evaluates `expr` in the environment containing `previous` as the [`ANS`](crate::env::ANS)
/// constant (if it is provided).
///
/// # Errors
///
/// See [`Environment::evaluate()`].
pub fn evaluate<'a>(expr: &SpannedExpr<'a>, previous: Option<f64>) -> EvalResult<'a> {
    Environment::new(previous).evaluate(expr)
}
