//! Integer division, gcd/lcm, numerator/denominator and rounding.
//!
//! Integer operations accept exact integers and integral reals. A real
//! operand makes the result inexact.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};

use crate::arith::{abs, add2, div2, mul2};
use crate::compare::{negative, require_real};
use crate::error::{Error, Result};
use crate::number::{Number, Ratio};

/// An integer operand with its exactness.
struct IntegerOperand {
    value: BigInt,
    inexact: bool,
}

fn integer_operand(n: &Number, primitive: &'static str) -> Result<IntegerOperand> {
    let value = match n {
        Number::Fixnum(i) => BigInt::from(*i),
        Number::Bignum(b) => (**b).clone(),
        Number::Real(d) if n.is_integer() => {
            return n
                .to_exact()
                .ok()
                .and_then(|exact| exact.exact_integer())
                .map(|value| IntegerOperand {
                    value,
                    inexact: true,
                })
                .ok_or_else(|| Error::not_an_integer(Number::Real(*d)).in_primitive(primitive));
        }
        _ => return Err(Error::not_an_integer(n).in_primitive(primitive)),
    };
    Ok(IntegerOperand {
        value,
        inexact: false,
    })
}

/// Truncated quotient and remainder of two integer operands.
fn integer_division(
    x: &Number,
    y: &Number,
    primitive: &'static str,
) -> Result<(Number, Number)> {
    if let (Number::Fixnum(a), Number::Fixnum(b)) = (x, y) {
        if *b == 0 {
            return Err(Error::divide_by_zero(x).in_primitive(primitive));
        }
        if let (Some(q), Some(r)) = (a.checked_div(*b), a.checked_rem(*b)) {
            return Ok((Number::Fixnum(q), Number::Fixnum(r)));
        }
    }
    let a = integer_operand(x, primitive)?;
    let b = integer_operand(y, primitive)?;
    if b.value.is_zero() {
        return Err(Error::divide_by_zero(x).in_primitive(primitive));
    }
    let inexact = a.inexact || b.inexact;
    let (q, r) = a.value.div_rem(&b.value);
    Ok((
        Number::from_bigint(q).with_exactness(inexact),
        Number::from_bigint(r).with_exactness(inexact),
    ))
}

/// `(quotient n1 n2)`: quotient truncated toward zero.
///
/// # Errors
///
/// Returns `NotAnInteger` for a non-integral operand and `DivideByZero`
/// when `n2` is zero.
pub fn quotient(x: &Number, y: &Number) -> Result<Number> {
    integer_division(x, y, "quotient").map(|(q, _)| q)
}

/// `(remainder n1 n2)`: remainder with the sign of `n1`.
///
/// # Errors
///
/// See [`quotient`].
pub fn remainder(x: &Number, y: &Number) -> Result<Number> {
    integer_division(x, y, "remainder").map(|(_, r)| r)
}

/// `(modulo n1 n2)`: remainder with the sign of `n2`.
///
/// # Errors
///
/// See [`quotient`].
pub fn modulo(x: &Number, y: &Number) -> Result<Number> {
    let (_, r) = integer_division(x, y, "modulo")?;
    if negative(x) != negative(y) && !r.is_zero() {
        Ok(add2(&r, y))
    } else {
        Ok(r)
    }
}

// =============================================================================
// gcd / lcm
// =============================================================================

fn gcd2(x: &Number, y: &Number, primitive: &'static str) -> Result<Number> {
    let a = integer_operand(x, primitive)?;
    let b = integer_operand(y, primitive)?;
    let inexact = a.inexact || b.inexact;
    Ok(Number::from_bigint(a.value.gcd(&b.value)).with_exactness(inexact))
}

/// `(gcd n ...)`: non-negative greatest common divisor; `(gcd)` is `0`.
///
/// # Errors
///
/// Returns `NotAnInteger` for a non-integral argument.
pub fn gcd(args: &[Number]) -> Result<Number> {
    let Some((first, rest)) = args.split_first() else {
        return Ok(Number::Fixnum(0));
    };
    let mut result = gcd2(first, &Number::Fixnum(0), "gcd")?;
    for n in rest {
        result = gcd2(&result, n, "gcd")?;
    }
    abs(&result)
}

/// `(lcm n ...)`: non-negative least common multiple; `(lcm)` is `1`.
///
/// # Errors
///
/// Returns `NotAnInteger` for a non-integral argument.
pub fn lcm(args: &[Number]) -> Result<Number> {
    let Some((first, rest)) = args.split_first() else {
        return Ok(Number::Fixnum(1));
    };
    integer_operand(first, "lcm")?;
    let mut result = first.clone();
    for n in rest {
        let divisor = gcd2(&result, n, "lcm")?;
        result = if divisor.is_zero() {
            mul2(&result, n)
        } else {
            mul2(&result, &div2(n, &divisor)?)
        };
    }
    abs(&result)
}

// =============================================================================
// numerator / denominator / integer-length
// =============================================================================

/// `(numerator q)`; inexact arguments give inexact results.
///
/// # Errors
///
/// Returns `NotARealNumber` for a complex argument and `OutOfRange` for an
/// infinity or NaN.
pub fn numerator(q: &Number) -> Result<Number> {
    require_real(q, "numerator")?;
    Ok(match q {
        Number::Rational(r) => Number::from_bigint(r.numer().clone()),
        Number::Real(_) => numerator(&q.to_exact()?)?.to_inexact(),
        _ => q.clone(),
    })
}

/// `(denominator q)`; inexact arguments give inexact results.
///
/// # Errors
///
/// See [`numerator`].
pub fn denominator(q: &Number) -> Result<Number> {
    require_real(q, "denominator")?;
    Ok(match q {
        Number::Rational(r) => Number::from_bigint(r.denom().clone()),
        Number::Real(_) => denominator(&q.to_exact()?)?.to_inexact(),
        _ => Number::Fixnum(1),
    })
}

/// `(integer-length n)`: bits needed for `n` in two's complement, without
/// the sign bit.
///
/// # Errors
///
/// Returns `NotAnInteger` unless `n` is an exact integer.
pub fn integer_length(n: &Number) -> Result<u64> {
    match n {
        Number::Fixnum(i) => {
            let magnitude = if *i < 0 { !*i } else { *i };
            Ok(u64::from(64 - magnitude.leading_zeros()))
        }
        Number::Bignum(b) => {
            let magnitude = if b.is_negative() {
                -(&**b) - BigInt::one()
            } else {
                (**b).clone()
            };
            Ok(magnitude.bits())
        }
        _ => Err(Error::not_an_integer(n).in_primitive("integer-length")),
    }
}

// =============================================================================
// Rounding
// =============================================================================

/// `(floor x)`: largest integer not greater than `x`, same exactness.
///
/// # Errors
///
/// Returns `NotARealNumber` for a complex argument.
pub fn floor(x: &Number) -> Result<Number> {
    require_real(x, "floor")?;
    Ok(match x {
        Number::Rational(r) => Number::from_bigint(floor_ratio(r.numer(), r.denom())),
        Number::Real(d) => Number::Real(d.floor()),
        _ => x.clone(),
    })
}

/// `(ceiling x)`: smallest integer not less than `x`, same exactness.
///
/// # Errors
///
/// Returns `NotARealNumber` for a complex argument.
pub fn ceiling(x: &Number) -> Result<Number> {
    require_real(x, "ceiling")?;
    Ok(match x {
        Number::Rational(r) => {
            let (n, d) = (r.numer(), r.denom());
            let q = if n.is_negative() {
                n / d
            } else {
                (n + d - BigInt::one()) / d
            };
            Number::from_bigint(q)
        }
        Number::Real(d) => Number::Real(d.ceil()),
        _ => x.clone(),
    })
}

/// `(truncate x)`: integer nearest `x` toward zero, same exactness.
///
/// # Errors
///
/// Returns `NotARealNumber` for a complex argument.
pub fn truncate(x: &Number) -> Result<Number> {
    require_real(x, "truncate")?;
    Ok(match x {
        Number::Rational(r) => Number::from_bigint(r.numer() / r.denom()),
        Number::Real(d) => Number::Real(d.trunc()),
        _ => x.clone(),
    })
}

/// `(round x)`: nearest integer, ties to even, same exactness.
///
/// # Errors
///
/// Returns `NotARealNumber` for a complex argument.
pub fn round(x: &Number) -> Result<Number> {
    require_real(x, "round")?;
    Ok(match x {
        Number::Rational(r) => Number::from_bigint(round_ratio(r)),
        Number::Real(d) => Number::Real(d.round_ties_even()),
        _ => x.clone(),
    })
}

fn floor_ratio(n: &BigInt, d: &BigInt) -> BigInt {
    if n.is_negative() {
        (n - (d - BigInt::one())) / d
    } else {
        n / d
    }
}

fn round_ratio(r: &Ratio) -> BigInt {
    let (n, d) = (r.numer(), r.denom());
    let two = BigInt::from(2);
    if *d == two {
        let shifted = if n.is_negative() {
            n - BigInt::one()
        } else {
            n + BigInt::one()
        };
        (shifted / BigInt::from(4)) * two
    } else {
        floor_ratio(&(n * &two + d), &(d * &two))
    }
}
