//! Floating-point arithmetic used by the evaluator.
//!
//! All operations take finite operands and either return a finite result or an
//! [`ArithmeticError`]. Floor division and remainder round toward negative infinity,
//! so that the remainder always has the sign of the divisor.

use core::fmt;

use calc_parser::BinaryOp;

/// Errors that can occur during arithmetic operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ArithmeticError {
    /// Division (or floor division, or remainder) by zero, or zero raised to a negative power.
    DivisionByZero,
    /// Result is mathematically undefined, e.g., the square root of a negative number.
    DomainError,
    /// Finite operands produce an infinite result.
    Overflow,
}

impl fmt::Display for ArithmeticError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(match self {
            Self::DivisionByZero => "division by zero",
            Self::DomainError => "math domain error",
            Self::Overflow => "numeric overflow",
        })
    }
}

impl std::error::Error for ArithmeticError {}

/// Checks that `value` produced from finite operands is finite.
pub(crate) fn checked(value: f64) -> Result<f64, ArithmeticError> {
    if value.is_finite() {
        Ok(value)
    } else if value.is_nan() {
        Err(ArithmeticError::DomainError)
    } else {
        Err(ArithmeticError::Overflow)
    }
}

/// Performs a binary operation on finite operands.
///
/// # Errors
///
/// - [`ArithmeticError::DivisionByZero`] if `op` is a division and `y` is zero,
///   or if zero is raised to a negative power.
/// - [`ArithmeticError::DomainError`] if a negative number is raised to a non-integer power.
/// - [`ArithmeticError::Overflow`] if the result is infinite.
pub fn binary_op(op: BinaryOp, x: f64, y: f64) -> Result<f64, ArithmeticError> {
    if op.is_division() && y == 0.0 {
        return Err(ArithmeticError::DivisionByZero);
    }

    match op {
        BinaryOp::Add => checked(x + y),
        BinaryOp::Sub => checked(x - y),
        BinaryOp::Mul => checked(x * y),
        BinaryOp::Div => checked(x / y),
        BinaryOp::FloorDiv => floor_div_mod(x, y).map(|(div, _)| div),
        BinaryOp::Mod => floor_div_mod(x, y).map(|(_, rem)| rem),
        BinaryOp::Power => pow(x, y),
    }
}

/// Computes floor division and remainder: `x == div * y + rem`, where `div` is integral
/// and `rem` has the same sign as `y` (or is a zero with the sign of `y`).
///
/// The quotient is derived from the exact remainder rather than from `(x / y).floor()`,
/// which may be off by one because of rounding.
///
/// # Errors
///
/// - [`ArithmeticError::DivisionByZero`] if `y` is zero.
/// - [`ArithmeticError::Overflow`] if the quotient is infinite.
pub fn floor_div_mod(x: f64, y: f64) -> Result<(f64, f64), ArithmeticError> {
    if y == 0.0 {
        return Err(ArithmeticError::DivisionByZero);
    }

    // `%` on floats has the sign of the dividend (same as C `fmod`).
    let mut rem = x % y;
    let mut div = (x - rem) / y;
    if rem == 0.0 {
        rem = 0.0_f64.copysign(y);
    } else if (y < 0.0) != (rem < 0.0) {
        rem += y;
        div -= 1.0;
    }

    let floor_div = if div == 0.0 {
        0.0_f64.copysign(x / y)
    } else {
        // `div` is approximately integral; snap it to the nearest integer.
        let mut floor_div = div.floor();
        if div - floor_div > 0.5 {
            floor_div += 1.0;
        }
        floor_div
    };
    Ok((checked(floor_div)?, rem))
}

/// Raises `base` to the power of `exponent`.
///
/// # Errors
///
/// - [`ArithmeticError::DivisionByZero`] if `base` is zero and `exponent` is negative.
/// - [`ArithmeticError::DomainError`] if `base` is negative and `exponent` is not an integer.
/// - [`ArithmeticError::Overflow`] if the result is infinite.
pub fn pow(base: f64, exponent: f64) -> Result<f64, ArithmeticError> {
    if base == 0.0 && exponent < 0.0 {
        Err(ArithmeticError::DivisionByZero)
    } else if base < 0.0 && exponent.fract() != 0.0 {
        Err(ArithmeticError::DomainError)
    } else {
        checked(base.powf(exponent))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn floor_division_and_remainder() {
        let samples = [
            (7.0, 2.0, 3.0, 1.0),
            (-7.0, 2.0, -4.0, 1.0),
            (7.0, -2.0, -4.0, -1.0),
            (-7.0, -2.0, 3.0, -1.0),
            (5.0, 2.5, 2.0, 0.0),
            (7.5, 2.0, 3.0, 1.5),
            (-7.5, 2.0, -4.0, 0.5),
        ];
        for (x, y, expected_div, expected_rem) in samples {
            let (div, rem) = floor_div_mod(x, y).unwrap();
            assert_eq!(div, expected_div, "{x} // {y}");
            assert_eq!(rem, expected_rem, "{x} % {y}");
        }
    }

    #[test]
    fn floor_division_is_not_affected_by_rounding() {
        // `1 / 0.1` rounds to exactly 10, but 0.1 is slightly larger than 1/10.
        let (div, rem) = floor_div_mod(1.0, 0.1).unwrap();
        assert_eq!(div, 9.0);
        assert!(rem > 0.0 && rem < 0.1);
    }

    #[test]
    fn zero_results_have_correct_sign() {
        let (div, rem) = floor_div_mod(4.0, -2.0).unwrap();
        assert_eq!(div, -2.0);
        assert!(rem == 0.0 && rem.is_sign_negative());

        let (div, rem) = floor_div_mod(1.0, 3.0).unwrap();
        assert!(div == 0.0 && div.is_sign_positive());
        assert_eq!(rem, 1.0);

        let (div, _) = floor_div_mod(0.0, -3.0).unwrap();
        assert!(div == 0.0 && div.is_sign_negative());
    }

    #[test]
    fn division_by_zero() {
        for op in [BinaryOp::Div, BinaryOp::FloorDiv, BinaryOp::Mod] {
            assert_eq!(binary_op(op, 1.0, 0.0), Err(ArithmeticError::DivisionByZero));
            assert_eq!(binary_op(op, 0.0, -0.0), Err(ArithmeticError::DivisionByZero));
        }
        assert_eq!(pow(0.0, -1.0), Err(ArithmeticError::DivisionByZero));
        assert_eq!(pow(0.0, 0.0), Ok(1.0));
        assert_eq!(pow(0.0, 2.0), Ok(0.0));
    }

    #[test]
    fn power_domain() {
        assert_eq!(pow(-8.0, 1.0 / 3.0), Err(ArithmeticError::DomainError));
        assert_eq!(pow(-2.0, 3.0), Ok(-8.0));
        assert_eq!(pow(-2.0, -2.0), Ok(0.25));
        assert_eq!(pow(4.0, 0.5), Ok(2.0));
    }

    #[test]
    fn overflow() {
        assert_eq!(binary_op(BinaryOp::Mul, 1e200, 1e200), Err(ArithmeticError::Overflow));
        assert_eq!(binary_op(BinaryOp::Add, f64::MAX, f64::MAX), Err(ArithmeticError::Overflow));
        assert_eq!(binary_op(BinaryOp::Div, 1e300, 1e-300), Err(ArithmeticError::Overflow));
        assert_eq!(pow(10.0, 400.0), Err(ArithmeticError::Overflow));
        assert_matches!(
            binary_op(BinaryOp::FloorDiv, 1e300, 1e-300),
            Err(ArithmeticError::Overflow)
        );
    }

    #[test]
    fn ordinary_ops() {
        assert_eq!(binary_op(BinaryOp::Add, 2.0, 3.0), Ok(5.0));
        assert_eq!(binary_op(BinaryOp::Sub, 2.0, 3.0), Ok(-1.0));
        assert_eq!(binary_op(BinaryOp::Mul, 2.0, 3.0), Ok(6.0));
        assert_eq!(binary_op(BinaryOp::Div, 5.0, 2.0), Ok(2.5));
        assert_eq!(binary_op(BinaryOp::FloorDiv, 5.0, 2.0), Ok(2.0));
        assert_eq!(binary_op(BinaryOp::Mod, 5.0, 2.0), Ok(1.0));
        assert_eq!(binary_op(BinaryOp::Power, 2.0, 10.0), Ok(1024.0));
    }
}
