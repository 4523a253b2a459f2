//! Evaluation errors.

use core::fmt;

use crate::{arith::ArithmeticError, fns::StdFunction, Environment};
use calc_parser::{BinaryOp, LocatedSpan, Spanned};

/// Operation that has failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Operation {
    /// Binary operation, e.g., division.
    Binary(BinaryOp),
    /// Call of a standard function.
    Call(StdFunction),
}

impl fmt::Display for Operation {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Binary(op) => fmt::Display::fmt(op, formatter),
            Self::Call(function) => write!(formatter, "function `{function}`"),
        }
    }
}

/// Errors that can occur when evaluating expressions.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum EvalError {
    /// Name is not bound in the environment.
    UnknownName(String),
    /// Call target is not a function in the environment.
    UnknownFunction(String),
    /// Number of args in a call differs from the function arity.
    ArityMismatch {
        /// Called function.
        function: StdFunction,
        /// Number of args the function accepts.
        expected: usize,
        /// Number of args in the call.
        actual: usize,
    },
    /// Division by zero, or zero raised to a negative power.
    DivisionByZero {
        /// Failed operation.
        op: Operation,
    },
    /// Result of the operation is mathematically undefined.
    DomainError {
        /// Failed operation.
        op: Operation,
    },
    /// Function name is used where a number is required.
    NotANumber(String),
    /// Finite operands produce an infinite result.
    Overflow {
        /// Failed operation.
        op: Operation,
    },
}

impl fmt::Display for EvalError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownName(name) => write!(formatter, "Name `{name}` is not defined"),
            Self::UnknownFunction(name) => write!(formatter, "`{name}` is not a known function"),
            Self::ArityMismatch {
                function,
                expected,
                actual,
            } => write!(
                formatter,
                "Function `{function}` expects {expected} arg(s), but was called with {actual}"
            ),
            Self::DivisionByZero { op } => write!(formatter, "Division by zero in {op}"),
            Self::DomainError { op } => write!(formatter, "Math domain error in {op}"),
            Self::NotANumber(name) => write!(formatter, "`{name}` is a function, not a number"),
            Self::Overflow { op } => write!(formatter, "Numeric overflow in {op}"),
        }
    }
}

impl std::error::Error for EvalError {}

impl EvalError {
    pub(crate) fn arithmetic(err: ArithmeticError, op: Operation) -> Self {
        match err {
            ArithmeticError::DivisionByZero => Self::DivisionByZero { op },
            ArithmeticError::DomainError => Self::DomainError { op },
            ArithmeticError::Overflow => Self::Overflow { op },
        }
    }

    /// Returns the failed operation for arithmetic errors.
    pub fn operation(&self) -> Option<Operation> {
        match self {
            Self::DivisionByZero { op } | Self::DomainError { op } | Self::Overflow { op } => {
                Some(*op)
            }
            _ => None,
        }
    }

    /// Returns shortened error cause.
    pub fn to_short_string(&self) -> String {
        match self {
            Self::UnknownName(_) => "Undefined name".to_owned(),
            Self::UnknownFunction(_) => "Unknown function".to_owned(),
            Self::ArityMismatch { function, .. } => {
                format!("Wrong number of args for function `{function}`")
            }
            Self::DivisionByZero { .. } => "Division by zero".to_owned(),
            Self::DomainError { .. } => "Math domain error".to_owned(),
            Self::NotANumber(_) => "Function used as a number".to_owned(),
            Self::Overflow { .. } => "Numeric overflow".to_owned(),
        }
    }

    /// Returns a short description of the spanned information.
    pub fn main_span_info(&self) -> String {
        if let Some(op) = self.operation() {
            return format!("Failed {op}");
        }
        match self {
            Self::UnknownName(_) => "Undefined name occurrence".to_owned(),
            Self::UnknownFunction(_) => "Cannot be called".to_owned(),
            Self::ArityMismatch { actual, .. } => format!("Called with {actual} arg(s) here"),
            Self::NotANumber(_) => "Used as a number".to_owned(),
            _ => "Failed operation".to_owned(),
        }
    }

    /// Returns information helping fix the error.
    pub fn help(&self) -> Option<String> {
        let env = Environment::default();
        Some(match self {
            Self::UnknownName(name) if name == crate::env::ANS => {
                "`ans` is only defined after a successful evaluation".to_owned()
            }
            Self::UnknownName(_) => format!(
                "Known constants are {}; `ans` refers to the previous result",
                list_names(&env.constant_names())
            ),
            Self::UnknownFunction(_) => format!(
                "Callable functions are {}",
                list_names(&env.function_names())
            ),
            Self::ArityMismatch { expected, .. } => {
                format!("Pass exactly {expected} arg(s) to the function")
            }
            Self::DomainError {
                op: Operation::Call(function),
            } => match function.domain() {
                Some(domain) => format!("`{function}` is only defined for {domain}"),
                None => return None,
            },
            Self::DomainError {
                op: Operation::Binary(BinaryOp::Power),
            } => "Negative numbers cannot be raised to a fractional power".to_owned(),
            Self::NotANumber(name) => format!("Call the function instead, e.g., `{name}(1)`"),
            _ => return None,
        })
    }
}

fn list_names(names: &[&str]) -> String {
    let names: Vec<_> = names.iter().map(|name| format!("`{name}`")).collect();
    names.join(", ")
}

/// Auxiliary information about an evaluation error.
#[derive(Debug, Clone, Copy, PartialEq)]
#[non_exhaustive]
pub enum AuxErrorInfo {
    /// Divisor that evaluated to zero.
    ZeroDivisor,
    /// Operand of a failed binary operation.
    Operand(f64),
    /// Arg of a failed function call.
    Arg(f64),
}

impl fmt::Display for AuxErrorInfo {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroDivisor => formatter.write_str("Divisor evaluated to zero"),
            Self::Operand(value) => write!(formatter, "Operand evaluated to {value}"),
            Self::Arg(value) => write!(formatter, "Argument evaluated to {value}"),
        }
    }
}

/// Evaluation error together with one or more relevant code spans.
#[derive(Debug, Clone)]
pub struct SpannedEvalError<'a> {
    error: EvalError,
    main_span: Spanned<'a>,
    aux_spans: Vec<Spanned<'a, AuxErrorInfo>>,
}

impl<'a> SpannedEvalError<'a> {
    pub(crate) fn new<T>(main_span: &LocatedSpan<&'a str, T>, error: EvalError) -> Self {
        Self {
            error,
            main_span: main_span.with_no_extra(),
            aux_spans: vec![],
        }
    }

    pub(crate) fn with_span<T>(mut self, span: &LocatedSpan<&'a str, T>, info: AuxErrorInfo) -> Self {
        self.aux_spans.push(span.copy_with_extra(info));
        self
    }

    /// Returns the source of the error.
    pub fn kind(&self) -> &EvalError {
        &self.error
    }

    /// Returns the main span of the error.
    pub fn main_span(&self) -> Spanned<'a> {
        self.main_span
    }

    /// Returns auxiliary spans for the error.
    pub fn aux_spans(&self) -> &[Spanned<'a, AuxErrorInfo>] {
        &self.aux_spans
    }
}

impl fmt::Display for SpannedEvalError<'_> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "{}:{}: {}",
            self.main_span.location_line(),
            self.main_span.get_column(),
            self.error
        )
    }
}

impl std::error::Error for SpannedEvalError<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// Error returned by [`evaluate_expression()`](crate::evaluate_expression()): either a parsing
/// or an evaluation error.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum EvaluationError<'a> {
    /// Error parsing the expression.
    Parse(calc_parser::Error<'a>),
    /// Error evaluating the parsed expression.
    Eval(SpannedEvalError<'a>),
}

impl<'a> EvaluationError<'a> {
    /// Returns the main span of the error.
    pub fn main_span(&self) -> Spanned<'a> {
        match self {
            Self::Parse(err) => err.span(),
            Self::Eval(err) => err.main_span(),
        }
    }
}

impl fmt::Display for EvaluationError<'_> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(formatter, "parse error at {err}"),
            Self::Eval(err) => write!(formatter, "evaluation error at {err}"),
        }
    }
}

impl std::error::Error for EvaluationError<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(_) => None,
            Self::Eval(err) => Some(err.kind()),
        }
    }
}

impl<'a> From<calc_parser::Error<'a>> for EvaluationError<'a> {
    fn from(err: calc_parser::Error<'a>) -> Self {
        Self::Parse(err)
    }
}

impl<'a> From<SpannedEvalError<'a>> for EvaluationError<'a> {
    fn from(err: SpannedEvalError<'a>) -> Self {
        Self::Eval(err)
    }
}
