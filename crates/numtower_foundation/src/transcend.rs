//! Transcendental functions, square root, exponentiation and polar form.
//!
//! Where possible a real argument produces a real result, and a handful of
//! arguments produce exact results: `(exp 0)`, `(sin 0)`, `(cos 0)`,
//! `(log 1)`, the hyperbolic functions at zero (exact or inexact), and
//! square roots of exact perfect squares.

use std::f64::consts::{LN_2, PI};

use num_bigint::BigInt;

use crate::arith::{abs, add2, div2, mul2, negate, sub2};
use crate::compare::{negative, num_eq, positive, require_real};
use crate::error::{Error, Result};
use crate::number::{Number, Ratio, big_to_f64, make_complex};

fn one() -> Number {
    Number::Fixnum(1)
}

fn i_unit() -> Number {
    Number::complex_raw(Number::Fixnum(0), Number::Fixnum(1))
}

fn minus_i() -> Number {
    Number::complex_raw(Number::Fixnum(0), Number::Fixnum(-1))
}

fn two_i() -> Number {
    Number::complex_raw(Number::Fixnum(0), Number::Fixnum(2))
}

/// Natural logarithm of a positive big integer without overflowing.
fn big_ln(n: &BigInt) -> f64 {
    let bits = n.bits();
    if bits <= 1000 {
        return big_to_f64(n).ln();
    }
    let shift = bits - 64;
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    let (top, shift) = (big_to_f64(&(n >> shift as usize)), shift as f64);
    top.ln() + shift * LN_2
}

// =============================================================================
// Exponential and logarithm
// =============================================================================

/// `(exp z)`.
///
/// # Errors
///
/// Never fails for finite or infinite inputs; the `Result` matches the other
/// transcendental functions.
pub fn exp(z: &Number) -> Result<Number> {
    match z {
        Number::Fixnum(0) => Ok(one()),
        Number::Complex(c) => polar(&exp(c.re())?, c.im()),
        _ => Ok(Number::Real(z.real_to_f64().exp())),
    }
}

/// `(log z)`: principal natural logarithm.
///
/// Negative reals give `log|z| + πi`, and `-0.0` gives `-inf.0+πi`.
///
/// # Errors
///
/// Returns `OutOfRange` for exact zero.
pub fn log(z: &Number) -> Result<Number> {
    if !matches!(z, Number::Complex(_)) && negative(z) && z.is_finite() {
        return Ok(make_complex(log(&negate(z))?, Number::Real(PI)));
    }
    match z {
        Number::Fixnum(0) => {
            Err(Error::out_of_range("log is not defined for 0").in_primitive("log"))
        }
        Number::Fixnum(1) => Ok(Number::Fixnum(0)),
        #[allow(clippy::cast_precision_loss)]
        Number::Fixnum(i) => Ok(Number::Real((*i as f64).ln())),
        Number::Bignum(b) => Ok(Number::Real(big_ln(b))),
        Number::Rational(r) => Ok(Number::Real(big_ln(r.numer()) - big_ln(r.denom()))),
        Number::Real(d) => {
            if *d == 0.0 && d.is_sign_negative() {
                Ok(Number::complex_raw(
                    Number::Real(f64::NEG_INFINITY),
                    Number::Real(PI),
                ))
            } else {
                Ok(Number::Real(d.ln()))
            }
        }
        Number::Complex(_) => Ok(make_complex(log(&magnitude(z)?)?, angle(z)?)),
    }
}

/// `(log z b)`: logarithm of `z` in base `b`.
///
/// # Errors
///
/// Returns `OutOfRange` if either argument is exact zero and
/// `DivideByZero` for base exact `1`.
pub fn log_base(z: &Number, base: &Number) -> Result<Number> {
    div2(&log(z)?, &log(base)?).map_err(|e| e.in_primitive("log"))
}

// =============================================================================
// Trigonometric functions
// =============================================================================

/// `e^{iz}` and `e^{-iz}` for a complex `z`.
fn exp_i_pair(re: &Number, im: &Number) -> Result<(Number, Number)> {
    let forward = exp(&make_complex(negate(im), re.clone()))?;
    let backward = exp(&make_complex(im.clone(), negate(re)))?;
    Ok((forward, backward))
}

/// `(sin z)`.
///
/// # Errors
///
/// Never fails; see [`exp`].
pub fn sin(z: &Number) -> Result<Number> {
    match z {
        Number::Fixnum(0) => Ok(Number::Fixnum(0)),
        Number::Complex(c) => {
            let (a, b) = exp_i_pair(c.re(), c.im())?;
            div2(&sub2(&a, &b), &two_i())
        }
        _ => Ok(Number::Real(z.real_to_f64().sin())),
    }
}

/// `(cos z)`.
///
/// # Errors
///
/// Never fails; see [`exp`].
pub fn cos(z: &Number) -> Result<Number> {
    match z {
        Number::Fixnum(0) => Ok(one()),
        Number::Complex(c) => {
            let (a, b) = exp_i_pair(c.re(), c.im())?;
            div2(&add2(&a, &b), &Number::Fixnum(2))
        }
        _ => Ok(Number::Real(z.real_to_f64().cos())),
    }
}

/// `(tan z)`.
///
/// # Errors
///
/// Never fails; see [`exp`].
pub fn tan(z: &Number) -> Result<Number> {
    match z {
        Number::Fixnum(0) => Ok(Number::Fixnum(0)),
        Number::Complex(c) => {
            let (a, b) = exp_i_pair(c.re(), c.im())?;
            let ratio = div2(&sub2(&a, &b), &add2(&a, &b))?;
            Ok(match &ratio {
                Number::Complex(r) => make_complex(r.im().clone(), negate(r.re())),
                other => make_complex(Number::Fixnum(0), negate(other)),
            })
        }
        _ => Ok(Number::Real(z.real_to_f64().tan())),
    }
}

fn asin_complex(z: &Number) -> Result<Number> {
    let root = sqrt(&sub2(&one(), &mul2(z, z)))?;
    Ok(mul2(&minus_i(), &log(&add2(&mul2(&i_unit(), z), &root))?))
}

fn asin_real(d: f64) -> Result<Number> {
    if d < -1.0 {
        Ok(negate(&asin_real(-d)?))
    } else if d > 1.0 {
        asin_complex(&Number::Real(d))
    } else {
        Ok(Number::Real(d.asin()))
    }
}

/// `(asin z)`; real arguments outside `[-1, 1]` give complex results.
///
/// # Errors
///
/// Never fails; see [`exp`].
pub fn asin(z: &Number) -> Result<Number> {
    match z {
        Number::Fixnum(0) => Ok(Number::Fixnum(0)),
        Number::Complex(c) => {
            if positive(c.im()) || (c.im().is_zero() && negative(c.re())) {
                Ok(negate(&asin_complex(&negate(z))?))
            } else {
                asin_complex(z)
            }
        }
        _ => asin_real(z.real_to_f64()),
    }
}

fn acos_complex(z: &Number) -> Result<Number> {
    let root = sqrt(&sub2(&one(), &mul2(z, z)))?;
    Ok(mul2(&minus_i(), &log(&add2(z, &mul2(&i_unit(), &root)))?))
}

/// `(acos z)`; real arguments outside `(-1, 1)` go through the complex form.
///
/// # Errors
///
/// Never fails; see [`exp`].
pub fn acos(z: &Number) -> Result<Number> {
    match z {
        Number::Fixnum(0) => div2(&Number::Real(PI), &Number::Fixnum(2)),
        Number::Complex(_) => acos_complex(z),
        _ => {
            let d = z.real_to_f64();
            if -1.0 < d && d < 1.0 {
                Ok(Number::Real(d.acos()))
            } else {
                acos_complex(&Number::Real(d))
            }
        }
    }
}

/// `(atan z)`.
///
/// # Errors
///
/// Returns `OutOfRange` at the branch points `+i` and `-i`.
pub fn atan(z: &Number) -> Result<Number> {
    match z {
        Number::Fixnum(0) => Ok(Number::Fixnum(0)),
        Number::Complex(c) => {
            if c.re().is_zero()
                && (num_eq(c.im(), &one()) || num_eq(c.im(), &Number::Fixnum(-1)))
            {
                return Err(Error::out_of_range(format!("atan is not defined for {z}"))
                    .in_primitive("atan"));
            }
            let a = make_complex(negate(c.im()), c.re().clone());
            let difference = sub2(&log(&add2(&a, &one()))?, &log(&sub2(&one(), &a))?);
            div2(&difference, &two_i())
        }
        _ => Ok(Number::Real(z.real_to_f64().atan())),
    }
}

/// `(atan y x)`: angle of the point `(x, y)`, always inexact.
///
/// # Errors
///
/// Returns `NotARealNumber` if either argument is complex.
pub fn atan2(y: &Number, x: &Number) -> Result<Number> {
    require_real(y, "atan")?;
    require_real(x, "atan")?;
    Ok(Number::Real(y.real_to_f64().atan2(x.real_to_f64())))
}

// =============================================================================
// Hyperbolic functions
// =============================================================================

/// `e^z` and `e^-z`, for arguments without a fast native path.
fn exp_pair(z: &Number) -> Result<(Number, Number)> {
    let ez = exp(z)?;
    let inverse = div2(&one(), &ez)?;
    Ok((ez, inverse))
}

/// `(sinh z)`; exact `0` for any zero argument.
///
/// # Errors
///
/// Never fails; see [`exp`].
pub fn sinh(z: &Number) -> Result<Number> {
    match z {
        Number::Real(d) if *d == 0.0 => Ok(Number::Fixnum(0)),
        Number::Fixnum(0) => Ok(Number::Fixnum(0)),
        Number::Real(_) | Number::Fixnum(_) => Ok(Number::Real(z.real_to_f64().sinh())),
        _ => {
            let (ez, inverse) = exp_pair(z)?;
            div2(&sub2(&ez, &inverse), &Number::Real(2.0))
        }
    }
}

/// `(cosh z)`; exact `1` for any zero argument.
///
/// # Errors
///
/// Never fails; see [`exp`].
pub fn cosh(z: &Number) -> Result<Number> {
    match z {
        Number::Real(d) if *d == 0.0 => Ok(one()),
        Number::Fixnum(0) => Ok(one()),
        Number::Real(_) | Number::Fixnum(_) => Ok(Number::Real(z.real_to_f64().cosh())),
        _ => {
            let (ez, inverse) = exp_pair(z)?;
            div2(&add2(&ez, &inverse), &Number::Real(2.0))
        }
    }
}

/// `(tanh z)`; exact `0` for any zero argument.
///
/// # Errors
///
/// Never fails; see [`exp`].
pub fn tanh(z: &Number) -> Result<Number> {
    match z {
        Number::Real(d) if *d == 0.0 => Ok(Number::Fixnum(0)),
        Number::Fixnum(0) => Ok(Number::Fixnum(0)),
        Number::Real(_) | Number::Fixnum(_) => Ok(Number::Real(z.real_to_f64().tanh())),
        _ => {
            let (ez, inverse) = exp_pair(z)?;
            div2(&sub2(&ez, &inverse), &add2(&ez, &inverse))
        }
    }
}

/// `(asinh z)`; exact `0` for any zero argument.
///
/// # Errors
///
/// Never fails; see [`exp`].
pub fn asinh(z: &Number) -> Result<Number> {
    match z {
        Number::Real(d) if *d == 0.0 => Ok(Number::Fixnum(0)),
        Number::Fixnum(0) => Ok(Number::Fixnum(0)),
        Number::Real(_) | Number::Fixnum(_) => Ok(Number::Real(z.real_to_f64().asinh())),
        _ => log(&add2(z, &sqrt(&add2(&mul2(z, z), &one()))?)),
    }
}

fn acosh_general(z: &Number) -> Result<Number> {
    log(&add2(z, &sqrt(&sub2(&mul2(z, z), &one()))?))
}

/// Native `acosh` when `z·z - 1` and the sum stay finite and non-negative.
fn acosh_native(z: &Number, zz: f64) -> Result<Number> {
    let r = zz * zz - 1.0;
    if !r.is_infinite() && r >= 0.0 {
        let sum = r.sqrt() + zz;
        if !sum.is_infinite() {
            return Ok(Number::Real(sum.ln()));
        }
    }
    acosh_general(z)
}

/// `(acosh z)`; exact `0` for `1` and `1.0`.
///
/// # Errors
///
/// Never fails; see [`exp`].
pub fn acosh(z: &Number) -> Result<Number> {
    match z {
        Number::Real(d) if *d - 1.0 == 0.0 => Ok(Number::Fixnum(0)),
        Number::Fixnum(1) => Ok(Number::Fixnum(0)),
        Number::Real(_) | Number::Fixnum(_) => acosh_native(z, z.real_to_f64()),
        _ => acosh_general(z),
    }
}

fn halve(l: Number) -> Result<Number> {
    match l {
        Number::Real(d) => Ok(Number::Real(d / 2.0)),
        other => div2(&other, &Number::Real(2.0)),
    }
}

/// `(1/2)(ln numer - ln denom)` for `numer = 1 + z` and `denom = 1 - z`.
fn atanh_native(numer: f64, denom: f64) -> Result<Number> {
    if numer > 0.0 && denom > 0.0 {
        return Ok(Number::Real((numer.ln() - denom.ln()) / 2.0));
    }
    halve(sub2(
        &log(&Number::Real(numer))?,
        &log(&Number::Real(denom))?,
    ))
}

/// `(atanh z)`; exact `0` for any zero argument.
///
/// # Errors
///
/// Returns `OutOfRange` for `1` and `-1`.
pub fn atanh(z: &Number) -> Result<Number> {
    let out_of_range = || Error::out_of_range(format!("atanh is not defined for {z}")).in_primitive("atanh");
    match z {
        Number::Real(d) => {
            if *d == 1.0 || *d == -1.0 {
                return Err(out_of_range());
            }
            if *d == 0.0 {
                return Ok(Number::Fixnum(0));
            }
            atanh_native(1.0 + d, 1.0 - d)
        }
        Number::Fixnum(i) => {
            if *i == 1 || *i == -1 {
                return Err(out_of_range());
            }
            if *i == 0 {
                return Ok(Number::Fixnum(0));
            }
            #[allow(clippy::cast_precision_loss)]
            let d = *i as f64;
            atanh_native(1.0 + d, 1.0 - d)
        }
        _ => {
            let numer = add2(&one(), z);
            let denom = sub2(&one(), z);
            if numer.is_zero() || denom.is_zero() {
                return Err(out_of_range());
            }
            halve(sub2(&log(&numer)?, &log(&denom)?))
        }
    }
}

// =============================================================================
// Square root
// =============================================================================

fn sqrt_exact(x: &Number) -> Number {
    if x.is_zero() {
        return Number::Fixnum(0);
    }
    if negative(x) {
        return Number::complex_raw(Number::Fixnum(0), sqrt_exact(&negate(x)));
    }
    match x {
        Number::Fixnum(i) => {
            let root = i.isqrt();
            if root * root == *i {
                Number::Fixnum(root)
            } else {
                #[allow(clippy::cast_precision_loss)]
                let d = *i as f64;
                Number::Real(d.sqrt())
            }
        }
        Number::Bignum(b) => {
            let root = b.sqrt();
            if &root * &root == **b {
                Number::from_bigint(root)
            } else {
                Number::Real(big_to_f64(b).sqrt())
            }
        }
        _ => Number::Real(x.real_to_f64().sqrt()),
    }
}

/// `(sqrt z)`: principal square root.
///
/// Exact perfect squares (and ratios of them) stay exact; exact and finite
/// negative reals give imaginary results.
///
/// # Errors
///
/// Never fails; see [`exp`].
pub fn sqrt(z: &Number) -> Result<Number> {
    match z {
        Number::Fixnum(_) | Number::Bignum(_) => Ok(sqrt_exact(z)),
        Number::Rational(r) => div2(
            &sqrt_exact(&Number::from_bigint(r.numer().clone())),
            &sqrt_exact(&Number::from_bigint(r.denom().clone())),
        ),
        Number::Real(d) => {
            if *d < 0.0 && d.is_finite() {
                Ok(Number::complex_raw(
                    Number::Fixnum(0),
                    Number::Real((-d).sqrt()),
                ))
            } else {
                Ok(Number::Real(d.sqrt()))
            }
        }
        Number::Complex(_) => {
            let half_angle = div2(&angle(z)?, &Number::Fixnum(2))?;
            polar(&sqrt(&magnitude(z)?)?, &half_angle)
        }
    }
}

// =============================================================================
// Exponentiation
// =============================================================================

/// `(expt x y)`: `x` raised to the power `y`.
///
/// `0^0` is exact `1`; `0^y` is `0` when the real part of `y` is positive.
/// Exact bases with exact integer exponents give exact results.
///
/// # Errors
///
/// Returns `DivideByZero` for exact `0` raised to a negative power,
/// `OutOfRange` for exponents too large to compute exactly and for `0`
/// raised to a complex power with non-positive real part.
pub fn expt(x: &Number, y: &Number) -> Result<Number> {
    let result = if y.is_real() && negative(y) {
        expt_non_negative(x, &negate(y)).and_then(|p| div2(&one(), &p))
    } else {
        expt_non_negative(x, y)
    };
    result.map_err(|e| e.in_primitive("expt"))
}

fn expt_non_negative(x: &Number, y: &Number) -> Result<Number> {
    match y {
        Number::Fixnum(_) | Number::Bignum(_) => exact_exponent_expt(x, y),
        Number::Rational(_) | Number::Real(_) => {
            if y.is_zero() {
                return Ok(Number::Real(1.0));
            }
            if x.is_zero() {
                return Ok(if *x == Number::Fixnum(0) {
                    x.clone()
                } else {
                    Number::Real(0.0)
                });
            }
            if let Number::Real(e) = y {
                if let Number::Real(b) = x {
                    let r = b.powf(*e);
                    if !r.is_infinite() || !b.is_finite() || !e.is_finite() {
                        return Ok(Number::Real(r));
                    }
                }
                if *e - e.floor() == 0.0 {
                    return Ok(exact_exponent_expt(x, &y.to_exact()?)?.to_inexact());
                }
            }
            general_expt(x, y)
        }
        Number::Complex(_) => general_expt(x, y),
    }
}

/// `exp(y · log x)`, with the zero-base rule for complex exponents.
fn general_expt(x: &Number, y: &Number) -> Result<Number> {
    if x.is_zero() {
        if positive(&y.real_part()) {
            return Ok(Number::Fixnum(0).with_exactness(x.is_inexact()));
        }
        return Err(Error::out_of_range(format!(
            "power of zero to a complex exponent with non-positive real part {y}"
        )));
    }
    exp(&mul2(&log(x)?, y))
}

/// `x^y` for an exact non-negative integer `y`.
fn exact_exponent_expt(x: &Number, y: &Number) -> Result<Number> {
    if y.is_zero() {
        return Ok(one());
    }
    if x.is_zero() || *x == one() {
        return Ok(x.clone());
    }
    let too_big = || Error::out_of_range(format!("exponent too big: {y}"));
    let Number::Fixnum(e) = y else {
        return Err(too_big());
    };
    let e = u64::try_from(*e).map_err(|_| too_big())?;
    match x {
        Number::Fixnum(-1) => Ok(Number::Fixnum(if e % 2 == 0 { 1 } else { -1 })),
        Number::Fixnum(_) | Number::Bignum(_) | Number::Rational(_) => {
            let e = u32::try_from(e).map_err(|_| too_big())?;
            Ok(match x {
                Number::Rational(r) => Ratio::reduce(r.numer().pow(e), r.denom().pow(e)),
                _ => {
                    let base = x.exact_integer().unwrap_or_default();
                    Number::from_bigint(base.pow(e))
                }
            })
        }
        Number::Real(_) | Number::Complex(_) => Ok(square_and_multiply(x, e)),
    }
}

fn square_and_multiply(x: &Number, mut e: u64) -> Number {
    let mut base = x.clone();
    let mut acc = one();
    while e > 1 {
        if e & 1 == 1 {
            acc = mul2(&base, &acc);
        }
        base = mul2(&base, &base);
        e >>= 1;
    }
    mul2(&acc, &base)
}

// =============================================================================
// Polar form
// =============================================================================

fn polar(magnitude: &Number, angle: &Number) -> Result<Number> {
    Ok(make_complex(
        mul2(magnitude, &cos(angle)?),
        mul2(magnitude, &sin(angle)?),
    ))
}

/// `(make-polar magnitude angle)`.
///
/// # Errors
///
/// Returns `NotARealNumber` if either argument is complex.
pub fn make_polar(magnitude: &Number, angle: &Number) -> Result<Number> {
    require_real(magnitude, "make-polar")?;
    require_real(angle, "make-polar")?;
    polar(magnitude, angle)
}

/// `(magnitude z)`; the absolute value for reals.
///
/// # Errors
///
/// Never fails; the `Result` comes from the square root.
pub fn magnitude(z: &Number) -> Result<Number> {
    match z {
        Number::Complex(c) => sqrt(&add2(&mul2(c.re(), c.re()), &mul2(c.im(), c.im()))),
        _ => abs(z),
    }
}

/// `(angle z)`: exact `0` for positive exact reals, `0.0` for positive
/// inexact reals, `π` for other reals.
///
/// # Errors
///
/// Never fails; see [`atan2`].
pub fn angle(z: &Number) -> Result<Number> {
    match z {
        Number::Complex(c) => atan2(c.im(), c.re()),
        Number::Real(_) => Ok(Number::Real(if positive(z) { 0.0 } else { PI })),
        _ => Ok(if positive(z) {
            Number::Fixnum(0)
        } else {
            Number::Real(PI)
        }),
    }
}
