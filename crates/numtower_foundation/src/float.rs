//! IEEE double introspection: `decode-float`, `encode-float` and the NaN
//! bit-field codec.
//!
//! A double is `sign · significand · 2^exponent` with a 53-bit significand.
//! NaNs carry a sign bit, a quiet bit (bit 51) and a 50-bit payload. A
//! signaling NaN clears bit 51 and sets bit 50, so a zero payload never
//! reads back as an infinity.

use log::trace;

use crate::arith::mul2;
use crate::compare::{negative, require_real};
use crate::error::{Error, Result};
use crate::number::Number;
use crate::transcend::expt;

/// Sign bit of a double.
pub const SIGN_MASK: u64 = 1 << 63;
/// Quiet bit of a NaN.
pub const QUIET_MASK: u64 = 1 << 51;
/// Bits available for a NaN payload.
pub const PAYLOAD_MASK: u64 = (1 << 50) - 1;

const QUIET_NAN: u64 = 0x7ff8_0000_0000_0000;
const SIGNALING_NAN: u64 = 0x7ff4_0000_0000_0000;

/// Largest significand accepted by [`encode_float`]: `2^53 - 1`.
pub const FLOAT_MAX_SIGNIFICAND: u64 = (1 << 53) - 1;
/// Smallest exponent accepted by [`encode_float`].
pub const FLOAT_MIN_EXPONENT: i64 = -1074;
/// Largest exponent accepted by [`encode_float`].
pub const FLOAT_MAX_EXPONENT: i64 = 971;

// =============================================================================
// NaN codec
// =============================================================================

/// Builds a NaN double from its fields. The payload must already fit
/// [`PAYLOAD_MASK`].
pub(crate) fn nan_from_fields(negative: bool, quiet: bool, payload: u64) -> f64 {
    let mut bits = if quiet { QUIET_NAN } else { SIGNALING_NAN };
    if negative {
        bits |= SIGN_MASK;
    }
    f64::from_bits(bits | (payload & PAYLOAD_MASK))
}

/// `(make-nan negative quiet payload)`.
///
/// # Errors
///
/// Returns `OutOfRange` if `payload` does not fit in 50 bits.
pub fn make_nan(negative: bool, quiet: bool, payload: u64) -> Result<Number> {
    if payload > PAYLOAD_MASK {
        return Err(Error::out_of_range(format!("bad payload {payload}")).in_primitive("make-nan"));
    }
    Ok(Number::Real(nan_from_fields(negative, quiet, payload)))
}

fn nan_bits(n: &Number, primitive: &'static str) -> Result<u64> {
    match n {
        Number::Real(d) if d.is_nan() => Ok(d.to_bits()),
        _ => Err(Error::bad_nan(n).in_primitive(primitive)),
    }
}

/// `(nan-negative? nan)`: whether the sign bit is set.
///
/// # Errors
///
/// Returns `BadNaN` if `n` is not a NaN.
pub fn nan_negative(n: &Number) -> Result<bool> {
    Ok(nan_bits(n, "nan-negative?")? & SIGN_MASK != 0)
}

/// `(nan-quiet? nan)`.
///
/// # Errors
///
/// Returns `BadNaN` if `n` is not a NaN.
pub fn nan_quiet(n: &Number) -> Result<bool> {
    Ok(nan_bits(n, "nan-quiet?")? & QUIET_MASK != 0)
}

/// `(nan-payload nan)`.
///
/// # Errors
///
/// Returns `BadNaN` if `n` is not a NaN.
pub fn nan_payload(n: &Number) -> Result<u64> {
    Ok(nan_bits(n, "nan-payload")? & PAYLOAD_MASK)
}

/// `(nan=? a b)`: same sign, quiet bit and payload.
///
/// # Errors
///
/// Returns `BadNaN` if either argument is not a NaN.
pub fn nan_equal(a: &Number, b: &Number) -> Result<bool> {
    Ok(nan_bits(a, "nan=?")? == nan_bits(b, "nan=?")?)
}

// =============================================================================
// decode-float / encode-float
// =============================================================================

/// Significand of a decoded double.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Significand {
    /// The double was a NaN.
    Nan,
    /// The double was an infinity.
    Infinite,
    /// A non-negative exact integer.
    Finite(Number),
}

/// Result of [`decode_float`]: `sign · significand · 2^exponent`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedFloat {
    /// Integer significand, or a marker for NaN and infinities.
    pub significand: Significand,
    /// Binary exponent.
    pub exponent: i64,
    /// `1` or `-1`; `0` for NaN.
    pub sign: i64,
}

/// `(decode-float n)`.
///
/// Exact arguments are first converted to the nearest double.
///
/// # Errors
///
/// Returns `NotARealNumber` for complex arguments.
pub fn decode_float(n: &Number) -> Result<DecodedFloat> {
    require_real(n, "decode-float")?;
    let d = n.real_to_f64();
    if d.is_nan() {
        return Ok(DecodedFloat {
            significand: Significand::Nan,
            exponent: 0,
            sign: 0,
        });
    }
    let sign = if d.is_sign_negative() { -1 } else { 1 };
    if d.is_infinite() {
        return Ok(DecodedFloat {
            significand: Significand::Infinite,
            exponent: 0,
            sign,
        });
    }

    let bits = d.to_bits();
    #[allow(clippy::cast_possible_wrap)]
    let biased = ((bits >> 52) & 0x7ff) as i64;
    let fraction = bits & ((1 << 52) - 1);
    let (significand, exponent) = match (biased, fraction) {
        (0, 0) => (0, 0),
        (0, _) => (fraction, FLOAT_MIN_EXPONENT),
        _ => (fraction | (1 << 52), biased - 1075),
    };
    trace!("decode-float {d}: {significand} * 2^{exponent}");
    Ok(DecodedFloat {
        significand: Significand::Finite(Number::from(significand)),
        exponent,
        sign,
    })
}

fn integer_argument(n: &Number, primitive: &'static str) -> Result<Number> {
    if !n.is_integer() {
        return Err(Error::not_an_integer(n).in_primitive(primitive));
    }
    n.to_exact()
}

/// `(encode-float significand exponent sign)`: the inverse of
/// [`decode_float`].
///
/// A finite significand gives the exact value `sign · significand ·
/// 2^exponent`.
///
/// # Errors
///
/// Returns `NotAnInteger` for non-integer arguments and `OutOfRange` when
/// the significand or exponent exceed the double format's limits.
pub fn encode_float(significand: &Significand, exponent: &Number, sign: &Number) -> Result<Number> {
    let exponent = integer_argument(exponent, "encode-float")?;
    let sign = integer_argument(sign, "encode-float")?;

    let significand = match significand {
        Significand::Nan => return Ok(Number::Real(nan_from_fields(false, false, 0))),
        Significand::Infinite => {
            return Ok(Number::Real(if negative(&sign) {
                f64::NEG_INFINITY
            } else {
                f64::INFINITY
            }));
        }
        Significand::Finite(s) => integer_argument(s, "encode-float")?,
    };

    if negative(&significand) {
        return Err(Error::out_of_range(format!("negative significand {significand}"))
            .in_primitive("encode-float"));
    }
    let max = Number::from(FLOAT_MAX_SIGNIFICAND);
    if crate::compare::compare(&significand, &max).is_gt() {
        return Err(Error::out_of_range(format!(
            "significand {significand} above maximum {max}"
        ))
        .in_primitive("encode-float"));
    }

    let in_range = match exponent {
        Number::Fixnum(e) => (FLOAT_MIN_EXPONENT..=FLOAT_MAX_EXPONENT).contains(&e),
        _ => false,
    };
    if !in_range {
        return Err(Error::out_of_range(format!(
            "exponent {exponent} outside [{FLOAT_MIN_EXPONENT}, {FLOAT_MAX_EXPONENT}]"
        ))
        .in_primitive("encode-float"));
    }

    let scale = expt(&Number::Fixnum(2), &exponent)?;
    Ok(mul2(&mul2(&sign, &significand), &scale))
}
