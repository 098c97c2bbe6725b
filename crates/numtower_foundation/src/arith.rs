//! The four arithmetic operations, their variadic forms, negation and `abs`.
//!
//! Binary operations coerce both operands to a common kind and return the
//! canonical result. Fixnum overflow promotes to a bignum. Exact division
//! by zero is an error; inexact division follows IEEE-754.

use std::ops::{Add, Mul, Neg, Sub};

use log::trace;
use num_bigint::BigInt;
use num_traits::{Signed, Zero};

use crate::coerce::{Coerced, coerce};
use crate::compare::require_real;
use crate::error::{Error, Result};
use crate::number::{Complex, Number, Ratio, make_complex};

fn promoted(operation: &str, n: BigInt) -> Number {
    trace!("fixnum {operation} overflowed, promoting to bignum");
    Number::from_bigint(n)
}

// =============================================================================
// Binary operations
// =============================================================================

/// `x + y`.
#[must_use]
pub fn add2(x: &Number, y: &Number) -> Number {
    match coerce(x, y) {
        Coerced::Fixnum(a, b) => a.checked_add(b).map_or_else(
            || promoted("addition", BigInt::from(a) + b),
            Number::Fixnum,
        ),
        Coerced::Bignum(a, b) => Number::from_bigint(a + b),
        Coerced::Rational(a, b) => Ratio::reduce(
            a.numer() * b.denom() + b.numer() * a.denom(),
            a.denom() * b.denom(),
        ),
        Coerced::Real(a, b) => Number::Real(a + b),
        Coerced::Complex(a, b) => make_complex(add2(a.re(), b.re()), add2(a.im(), b.im())),
    }
}

/// `x - y`.
#[must_use]
pub fn sub2(x: &Number, y: &Number) -> Number {
    match coerce(x, y) {
        Coerced::Fixnum(a, b) => a.checked_sub(b).map_or_else(
            || promoted("subtraction", BigInt::from(a) - b),
            Number::Fixnum,
        ),
        Coerced::Bignum(a, b) => Number::from_bigint(a - b),
        Coerced::Rational(a, b) => Ratio::reduce(
            a.numer() * b.denom() - b.numer() * a.denom(),
            a.denom() * b.denom(),
        ),
        Coerced::Real(a, b) => Number::Real(a - b),
        Coerced::Complex(a, b) => make_complex(sub2(a.re(), b.re()), sub2(a.im(), b.im())),
    }
}

/// `x * y`.
#[must_use]
pub fn mul2(x: &Number, y: &Number) -> Number {
    match coerce(x, y) {
        Coerced::Fixnum(a, b) => a.checked_mul(b).map_or_else(
            || promoted("multiplication", BigInt::from(a) * b),
            Number::Fixnum,
        ),
        Coerced::Bignum(a, b) => Number::from_bigint(a * b),
        Coerced::Rational(a, b) => {
            Ratio::reduce(a.numer() * b.numer(), a.denom() * b.denom())
        }
        Coerced::Real(a, b) => Number::Real(a * b),
        Coerced::Complex(a, b) => complex_mul(&a, &b),
    }
}

fn complex_mul(a: &Complex, b: &Complex) -> Number {
    let re = sub2(&mul2(a.re(), b.re()), &mul2(a.im(), b.im()));
    let im = add2(&mul2(a.re(), b.im()), &mul2(a.im(), b.re()));
    make_complex(re, im)
}

/// `x / y`.
///
/// # Errors
///
/// Returns `DivideByZero` when both operands are exact and `y` is zero.
/// Inexact division by zero yields an infinity or NaN.
pub fn div2(x: &Number, y: &Number) -> Result<Number> {
    match coerce(x, y) {
        Coerced::Fixnum(a, b) => {
            if b == 0 {
                return Err(Error::divide_by_zero(x));
            }
            Ok(Ratio::reduce(BigInt::from(a), BigInt::from(b)))
        }
        Coerced::Bignum(a, b) => {
            if b.is_zero() {
                return Err(Error::divide_by_zero(x));
            }
            Ok(Ratio::reduce(a, b))
        }
        Coerced::Rational(a, b) => {
            if b.numer().is_zero() {
                return Err(Error::divide_by_zero(x));
            }
            Ok(Ratio::reduce(a.numer() * b.denom(), a.denom() * b.numer()))
        }
        Coerced::Real(a, b) => Ok(Number::Real(a / b)),
        Coerced::Complex(a, b) => complex_div(&a, &b),
    }
}

fn complex_div(a: &Complex, b: &Complex) -> Result<Number> {
    if a.re().is_zero() && a.im().is_zero() {
        return Ok(make_complex(a.re().clone(), a.im().clone()));
    }
    let norm = add2(&mul2(b.re(), b.re()), &mul2(b.im(), b.im()));
    let re = add2(&mul2(a.re(), b.re()), &mul2(a.im(), b.im()));
    let im = sub2(&mul2(a.im(), b.re()), &mul2(a.re(), b.im()));
    Ok(make_complex(div2(&re, &norm)?, div2(&im, &norm)?))
}

// =============================================================================
// Variadic forms
// =============================================================================

/// `(+ x ...)`; the empty sum is exact `0`.
#[must_use]
pub fn add(args: &[Number]) -> Number {
    match args {
        [] => Number::Fixnum(0),
        [x] => add2(&Number::Fixnum(0), x),
        [first, rest @ ..] => rest.iter().fold(first.clone(), |acc, x| add2(&acc, x)),
    }
}

/// `(* x ...)`; the empty product is exact `1`.
#[must_use]
pub fn mul(args: &[Number]) -> Number {
    match args {
        [] => Number::Fixnum(1),
        [x] => mul2(&Number::Fixnum(1), x),
        [first, rest @ ..] => rest.iter().fold(first.clone(), |acc, x| mul2(&acc, x)),
    }
}

/// `(- x ...)`; a single argument is negated.
///
/// # Errors
///
/// Returns `ArityMismatch` for an empty argument list.
pub fn sub(args: &[Number]) -> Result<Number> {
    match args {
        [] => Err(Error::arity_mismatch("at least 1", 0).in_primitive("-")),
        [x] => Ok(sub2(&Number::Fixnum(0), x)),
        [first, rest @ ..] => Ok(rest.iter().fold(first.clone(), |acc, x| sub2(&acc, x))),
    }
}

/// `(/ x ...)`; a single argument is inverted.
///
/// # Errors
///
/// Returns `ArityMismatch` for an empty argument list and `DivideByZero`
/// for an exact zero divisor.
pub fn div(args: &[Number]) -> Result<Number> {
    let result = match args {
        [] => Err(Error::arity_mismatch("at least 1", 0)),
        [x] => div2(&Number::Fixnum(1), x),
        [first, rest @ ..] => rest
            .iter()
            .try_fold(first.clone(), |acc, x| div2(&acc, x)),
    };
    result.map_err(|e| e.in_primitive("/"))
}

/// Additive inverse.
#[must_use]
pub fn negate(x: &Number) -> Number {
    sub2(&Number::Fixnum(0), x)
}

/// `(abs x)`.
///
/// # Errors
///
/// Returns `NotARealNumber` for a complex argument.
pub fn abs(x: &Number) -> Result<Number> {
    require_real(x, "abs")?;
    Ok(match x {
        Number::Fixnum(i) => i.checked_abs().map_or_else(
            || promoted("abs", -BigInt::from(*i)),
            Number::Fixnum,
        ),
        Number::Bignum(b) => Number::from_bigint(b.abs()),
        Number::Rational(r) => Ratio::reduce(r.numer().abs(), r.denom().clone()),
        Number::Real(d) => {
            if *d < 0.0 {
                Number::Real(-d)
            } else {
                x.clone()
            }
        }
        Number::Complex(_) => x.clone(),
    })
}

// =============================================================================
// Operator implementations
// =============================================================================

macro_rules! forward_binop {
    ($trait:ident, $method:ident, $func:ident) => {
        impl $trait for &Number {
            type Output = Number;

            fn $method(self, rhs: &Number) -> Number {
                $func(self, rhs)
            }
        }

        impl $trait for Number {
            type Output = Number;

            fn $method(self, rhs: Number) -> Number {
                $func(&self, &rhs)
            }
        }
    };
}

forward_binop!(Add, add, add2);
forward_binop!(Sub, sub, sub2);
forward_binop!(Mul, mul, mul2);

impl Neg for &Number {
    type Output = Number;

    fn neg(self) -> Number {
        negate(self)
    }
}

impl Neg for Number {
    type Output = Number;

    fn neg(self) -> Number {
        negate(&self)
    }
}
