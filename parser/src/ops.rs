//! Operation-related types.

use core::fmt;

/// Priority of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[non_exhaustive]
pub enum OpPriority {
    /// Addition or subtraction: `+` or `-`.
    AddOrSub,
    /// Multiplication, division or remainder: `*`, `/`, `//` or `%`.
    MulOrDiv,
    /// Power (`**`). Binds tighter than unary ops on the left, but not on the right.
    Power,
}

/// Unary operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// Unary plus (`+`).
    Plus,
    /// Negation (`-`).
    Minus,
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plus => formatter.write_str("unary plus"),
            Self::Minus => formatter.write_str("negation"),
        }
    }
}

impl UnaryOp {
    /// Returns the string representation of this operation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Minus => "-",
        }
    }

    /// Interprets a binary operation token in a prefix position. Only `+` and `-`
    /// have unary counterparts.
    pub(crate) fn from_binary(op: BinaryOp) -> Option<Self> {
        match op {
            BinaryOp::Add => Some(Self::Plus),
            BinaryOp::Sub => Some(Self::Minus),
            _ => None,
        }
    }
}

/// Binary arithmetic operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    /// Addition (`+`).
    Add,
    /// Subtraction (`-`).
    Sub,
    /// Multiplication (`*`).
    Mul,
    /// True division (`/`).
    Div,
    /// Floor division (`//`).
    FloorDiv,
    /// Floor remainder (`%`).
    Mod,
    /// Power (`**`).
    Power,
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(match self {
            Self::Add => "addition",
            Self::Sub => "subtraction",
            Self::Mul => "multiplication",
            Self::Div => "division",
            Self::FloorDiv => "floor division",
            Self::Mod => "remainder",
            Self::Power => "exponentiation",
        })
    }
}

impl BinaryOp {
    /// Returns the string representation of this operation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::FloorDiv => "//",
            Self::Mod => "%",
            Self::Power => "**",
        }
    }

    /// Returns the priority of this operation.
    pub fn priority(self) -> OpPriority {
        match self {
            Self::Add | Self::Sub => OpPriority::AddOrSub,
            Self::Mul | Self::Div | Self::FloorDiv | Self::Mod => OpPriority::MulOrDiv,
            Self::Power => OpPriority::Power,
        }
    }

    /// Checks if this operation fails on a zero right-hand side.
    pub fn is_division(self) -> bool {
        matches!(self, Self::Div | Self::FloorDiv | Self::Mod)
    }
}
