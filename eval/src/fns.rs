//! Whitelisted standard functions.

use core::fmt;

use crate::arith::{checked, ArithmeticError};

/// Function callable from expressions. The set of functions is closed; each function
/// is bound to a concrete operation on `f64` at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum StdFunction {
    /// Square root. Defined for non-negative args.
    Sqrt,
    /// Sine (the arg is in radians).
    Sin,
    /// Cosine (the arg is in radians).
    Cos,
    /// Tangent (the arg is in radians).
    Tan,
    /// Natural logarithm. Defined for positive args.
    Log,
    /// Exponent, `e ** x`.
    Exp,
    /// Absolute value.
    Abs,
}

impl fmt::Display for StdFunction {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name())
    }
}

impl StdFunction {
    /// All functions in the order they are listed in diagnostics.
    pub const ALL: [Self; 7] = [
        Self::Sqrt,
        Self::Sin,
        Self::Cos,
        Self::Tan,
        Self::Log,
        Self::Exp,
        Self::Abs,
    ];

    /// Returns the name of this function as used in expressions.
    pub fn name(self) -> &'static str {
        match self {
            Self::Sqrt => "sqrt",
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Log => "log",
            Self::Exp => "exp",
            Self::Abs => "abs",
        }
    }

    /// Looks up a function by its name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|function| function.name() == name)
    }

    /// Returns the number of args this function accepts.
    pub fn arity(self) -> usize {
        1
    }

    /// Describes the domain of this function, if it is restricted.
    pub fn domain(self) -> Option<&'static str> {
        match self {
            Self::Sqrt => Some("non-negative numbers"),
            Self::Log => Some("positive numbers"),
            _ => None,
        }
    }

    /// Applies this function to a finite `arg`.
    ///
    /// # Errors
    ///
    /// - [`ArithmeticError::DomainError`] if `arg` is outside the function domain.
    /// - [`ArithmeticError::Overflow`] if the result is infinite (e.g., `exp(1000)`).
    pub fn apply(self, arg: f64) -> Result<f64, ArithmeticError> {
        match self {
            Self::Sqrt if arg < 0.0 => Err(ArithmeticError::DomainError),
            Self::Log if arg <= 0.0 => Err(ArithmeticError::DomainError),
            Self::Sqrt => checked(arg.sqrt()),
            Self::Sin => checked(arg.sin()),
            Self::Cos => checked(arg.cos()),
            Self::Tan => checked(arg.tan()),
            Self::Log => checked(arg.ln()),
            Self::Exp => checked(arg.exp()),
            Self::Abs => Ok(arg.abs()),
        }
    }
}
