//! Numeric comparison, sign and parity predicates, `max` and `min`.

use std::cmp::Ordering;

use num_integer::Integer;
use num_traits::{Signed, Zero};

use crate::arith::sub2;
use crate::error::{Error, Result};
use crate::number::Number;

/// Three-way comparison of two numbers.
///
/// Two NaNs compare equal and a single NaN compares `Greater`, whichever
/// side it is on. Complex numbers have no order: unequal complex values
/// compare `Greater`.
#[must_use]
pub fn compare(x: &Number, y: &Number) -> Ordering {
    match (x, y) {
        (Number::Fixnum(a), Number::Fixnum(b)) => a.cmp(b),
        (Number::Real(a), Number::Real(b)) => compare_doubles(*a, *b),
        (Number::Real(a), Number::Fixnum(b)) => {
            #[allow(clippy::cast_precision_loss)]
            compare_doubles(*a, *b as f64)
        }
        (Number::Fixnum(a), Number::Real(b)) => {
            #[allow(clippy::cast_precision_loss)]
            compare_doubles(*a as f64, *b)
        }
        _ => {
            let diff = sub2(x, y);
            if diff.is_zero() {
                Ordering::Equal
            } else if matches!(diff, Number::Complex(_)) {
                Ordering::Greater
            } else if negative(&diff) {
                Ordering::Less
            } else {
                Ordering::Greater
            }
        }
    }
}

fn compare_doubles(a: f64, b: f64) -> Ordering {
    if (a.is_nan() && b.is_nan()) || a == b {
        Ordering::Equal
    } else if a < b {
        Ordering::Less
    } else {
        Ordering::Greater
    }
}

/// Numeric equality across kinds and exactness (`(= x y)`).
#[must_use]
pub fn num_eq(x: &Number, y: &Number) -> bool {
    compare(x, y) == Ordering::Equal
}

// =============================================================================
// Variadic comparison predicates
// =============================================================================

/// `(= x1 x2 ...)`: all arguments numerically equal.
///
/// # Errors
///
/// Returns `ArityMismatch` for an empty argument list.
pub fn num_eq_all(args: &[Number]) -> Result<bool> {
    let Some((first, rest)) = args.split_first() else {
        return Err(Error::arity_mismatch("at least 1", 0).in_primitive("="));
    };
    let mut previous = first;
    for current in rest {
        if compare(previous, current) != Ordering::Equal {
            return Ok(false);
        }
        previous = current;
    }
    Ok(true)
}

/// `(< x1 x2 ...)`: strictly increasing.
///
/// # Errors
///
/// Returns `ArityMismatch` for an empty argument list and `NotARealNumber`
/// for a complex argument.
pub fn num_lt(args: &[Number]) -> Result<bool> {
    chain(args, "<", |ord| ord == Ordering::Less)
}

/// `(> x1 x2 ...)`: strictly decreasing.
///
/// # Errors
///
/// See [`num_lt`].
pub fn num_gt(args: &[Number]) -> Result<bool> {
    chain(args, ">", |ord| ord == Ordering::Greater)
}

/// `(<= x1 x2 ...)`: non-decreasing.
///
/// # Errors
///
/// See [`num_lt`].
pub fn num_le(args: &[Number]) -> Result<bool> {
    chain(args, "<=", |ord| ord != Ordering::Greater)
}

/// `(>= x1 x2 ...)`: non-increasing.
///
/// # Errors
///
/// See [`num_lt`].
pub fn num_ge(args: &[Number]) -> Result<bool> {
    chain(args, ">=", |ord| ord != Ordering::Less)
}

/// Checks every adjacent pair; all arguments are type-checked even after
/// the answer is known.
fn chain(args: &[Number], name: &'static str, holds: impl Fn(Ordering) -> bool) -> Result<bool> {
    let Some((first, rest)) = args.split_first() else {
        return Err(Error::arity_mismatch("at least 1", 0).in_primitive(name));
    };
    require_real(first, name)?;
    let mut result = true;
    let mut previous = first;
    for current in rest {
        require_real(current, name)?;
        if result && !holds(compare(previous, current)) {
            result = false;
        }
        previous = current;
    }
    Ok(result)
}

pub(crate) fn require_real(n: &Number, primitive: &'static str) -> Result<()> {
    if n.is_real() {
        Ok(())
    } else {
        Err(Error::not_a_real_number(n).in_primitive(primitive))
    }
}

// =============================================================================
// Sign and parity
// =============================================================================

/// Sign test for an operand already known to be real.
pub(crate) fn negative(n: &Number) -> bool {
    match n {
        Number::Fixnum(i) => *i < 0,
        Number::Bignum(b) => b.is_negative(),
        Number::Rational(r) => r.numer().is_negative(),
        Number::Real(d) => *d < 0.0,
        Number::Complex(_) => false,
    }
}

pub(crate) fn positive(n: &Number) -> bool {
    match n {
        Number::Fixnum(i) => *i > 0,
        Number::Bignum(b) => b.is_positive(),
        Number::Rational(r) => r.numer().is_positive(),
        Number::Real(d) => *d > 0.0,
        Number::Complex(_) => false,
    }
}

/// `(positive? x)`. Zero and NaN are not positive.
///
/// # Errors
///
/// Returns `NotARealNumber` for a complex argument.
pub fn is_positive(n: &Number) -> Result<bool> {
    require_real(n, "positive?")?;
    Ok(positive(n))
}

/// `(negative? x)`. Zero, `-0.0` and NaN are not negative.
///
/// # Errors
///
/// Returns `NotARealNumber` for a complex argument.
pub fn is_negative(n: &Number) -> Result<bool> {
    require_real(n, "negative?")?;
    Ok(negative(n))
}

/// Parity of a number; non-integers have neither parity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Parity {
    /// An odd integer.
    Odd,
    /// An even integer.
    Even,
    /// Not an integer: rationals, complex numbers, infinities, NaN and
    /// non-integral reals.
    Neither,
}

/// Classifies the parity of `n`.
#[must_use]
pub fn parity(n: &Number) -> Parity {
    let odd = match n {
        Number::Fixnum(i) => i & 1 == 1,
        Number::Bignum(b) => b.is_odd(),
        Number::Real(d) => {
            if d.is_infinite() || *d != d.round() {
                return Parity::Neither;
            }
            *d % 2.0 != 0.0
        }
        Number::Rational(_) | Number::Complex(_) => return Parity::Neither,
    };
    if odd { Parity::Odd } else { Parity::Even }
}

/// `(odd? n)`.
#[must_use]
pub fn is_odd(n: &Number) -> bool {
    parity(n) == Parity::Odd
}

/// `(even? n)`.
#[must_use]
pub fn is_even(n: &Number) -> bool {
    parity(n) == Parity::Even
}

// =============================================================================
// max / min
// =============================================================================

/// `(max x1 x2 ...)`; the result is inexact if any argument is inexact.
///
/// # Errors
///
/// Returns `ArityMismatch` for an empty argument list and `NotARealNumber`
/// for a complex argument.
pub fn max(args: &[Number]) -> Result<Number> {
    extremum(args, "max", Ordering::Less)
}

/// `(min x1 x2 ...)`; the result is inexact if any argument is inexact.
///
/// # Errors
///
/// See [`max`].
pub fn min(args: &[Number]) -> Result<Number> {
    extremum(args, "min", Ordering::Greater)
}

fn extremum(args: &[Number], name: &'static str, replace_when: Ordering) -> Result<Number> {
    let Some((first, rest)) = args.split_first() else {
        return Err(Error::arity_mismatch("at least 1", 0).in_primitive(name));
    };
    require_real(first, name)?;
    let mut inexact = first.is_inexact();
    let mut best = first;
    for current in rest {
        require_real(current, name)?;
        inexact |= current.is_inexact();
        if compare(best, current) == replace_when {
            best = current;
        }
    }
    Ok(best.clone().with_exactness(inexact))
}
