//! The numeric tower.
//!
//! [`Number`] is a tagged union over five kinds ordered by rank:
//! fixnum < bignum < rational < real < complex. Every constructor in this
//! crate returns the canonical (smallest) representation:
//!
//! - a bignum never holds a value that fits in an `i64`,
//! - a rational has a denominator greater than one and is fully reduced,
//! - a complex has a non-zero imaginary part.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive, Zero};

use crate::error::{Error, Result};

/// The kind of a number, ordered by rank in the tower.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NumberKind {
    /// Machine-word exact integer.
    Fixnum,
    /// Arbitrary-precision exact integer.
    Bignum,
    /// Exact ratio of two integers.
    Rational,
    /// IEEE-754 double.
    Real,
    /// Rectangular complex number.
    Complex,
}

impl NumberKind {
    /// Returns the name of this kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Fixnum => "fixnum",
            Self::Bignum => "bignum",
            Self::Rational => "rational",
            Self::Real => "real",
            Self::Complex => "complex",
        }
    }
}

impl fmt::Display for NumberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A number of any kind in the tower.
///
/// Equality (`==`) is structural: the same kind with the same components,
/// comparing doubles by bit pattern. Numeric equality across kinds is
/// [`crate::compare::num_eq`].
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Number {
    /// Exact integer that fits in an `i64`.
    Fixnum(i64),
    /// Exact integer outside the `i64` range.
    Bignum(Arc<BigInt>),
    /// Reduced exact fraction.
    Rational(Arc<Ratio>),
    /// Inexact real.
    Real(f64),
    /// Complex number with non-zero imaginary part.
    Complex(Arc<Complex>),
}

/// Exact fraction `numer / denom`.
///
/// Values reachable through [`Number::Rational`] are reduced with
/// `denom > 1`. Arithmetic internally also uses the unreduced `n/1` form.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ratio {
    numer: BigInt,
    denom: BigInt,
}

/// Rectangular complex number whose parts are non-complex numbers.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Complex {
    re: Number,
    im: Number,
}

// =============================================================================
// Ratio
// =============================================================================

impl Ratio {
    /// Integer viewed as `n/1`.
    pub(crate) fn from_integer(n: BigInt) -> Self {
        Self {
            numer: n,
            denom: BigInt::one(),
        }
    }

    /// Builds the canonical number for `numer / denom`.
    ///
    /// `denom` must be non-zero.
    pub(crate) fn reduce(numer: BigInt, denom: BigInt) -> Number {
        debug_assert!(!denom.is_zero());
        let (mut numer, mut denom) = if denom.is_negative() {
            (-numer, -denom)
        } else {
            (numer, denom)
        };
        let gcd = numer.gcd(&denom);
        if !gcd.is_one() {
            numer /= &gcd;
            denom /= &gcd;
        }
        if denom.is_one() {
            Number::from_bigint(numer)
        } else {
            Number::Rational(Arc::new(Self { numer, denom }))
        }
    }

    /// The numerator, carrying the sign.
    #[must_use]
    pub fn numer(&self) -> &BigInt {
        &self.numer
    }

    /// The positive denominator.
    #[must_use]
    pub fn denom(&self) -> &BigInt {
        &self.denom
    }

    /// Closest double, overflowing to an infinity.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        ratio_to_f64(&self.numer, &self.denom)
    }
}

// =============================================================================
// Complex
// =============================================================================

impl Complex {
    /// Pairs two parts without collapsing a zero imaginary part.
    pub(crate) fn raw(re: Number, im: Number) -> Self {
        Self { re, im }
    }

    /// The real part.
    #[must_use]
    pub fn re(&self) -> &Number {
        &self.re
    }

    /// The imaginary part.
    #[must_use]
    pub fn im(&self) -> &Number {
        &self.im
    }

    pub(crate) fn into_parts(self) -> (Number, Number) {
        (self.re, self.im)
    }
}

impl PartialEq for Complex {
    fn eq(&self, other: &Self) -> bool {
        self.re == other.re && self.im == other.im
    }
}

impl Eq for Complex {}

impl Hash for Complex {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.re.hash(state);
        self.im.hash(state);
    }
}

// =============================================================================
// Number: construction
// =============================================================================

impl Number {
    /// Canonical exact integer: a fixnum when the value fits.
    #[must_use]
    pub fn from_bigint(n: BigInt) -> Self {
        match n.to_i64() {
            Some(i) => Self::Fixnum(i),
            None => Self::Bignum(Arc::new(n)),
        }
    }

    /// Canonical exact fraction of two machine integers.
    ///
    /// # Errors
    ///
    /// Returns `DivideByZero` when `denom` is zero.
    pub fn rational(numer: impl Into<BigInt>, denom: impl Into<BigInt>) -> Result<Self> {
        let (numer, denom) = (numer.into(), denom.into());
        if denom.is_zero() {
            return Err(Error::divide_by_zero(numer));
        }
        Ok(Ratio::reduce(numer, denom))
    }

    /// Complex number from two non-complex parts, without collapsing.
    pub(crate) fn complex_raw(re: Self, im: Self) -> Self {
        Self::Complex(Arc::new(Complex::raw(re, im)))
    }

    /// Returns the kind of this number.
    #[must_use]
    pub fn kind(&self) -> NumberKind {
        match self {
            Self::Fixnum(_) => NumberKind::Fixnum,
            Self::Bignum(_) => NumberKind::Bignum,
            Self::Rational(_) => NumberKind::Rational,
            Self::Real(_) => NumberKind::Real,
            Self::Complex(_) => NumberKind::Complex,
        }
    }
}

/// Builds the canonical rational `numer / denom` from two exact integers.
///
/// # Errors
///
/// Returns `NotAnInteger` if either operand is not an exact integer and
/// `DivideByZero` if `denom` is zero.
pub fn make_rational(numer: &Number, denom: &Number) -> Result<Number> {
    let n = numer
        .exact_integer()
        .ok_or_else(|| Error::not_an_integer(numer))?;
    let d = denom
        .exact_integer()
        .ok_or_else(|| Error::not_an_integer(denom))?;
    if d.is_zero() {
        return Err(Error::divide_by_zero(numer));
    }
    Ok(Ratio::reduce(n, d))
}

/// Builds `re + im·i`, collapsing to `re` when `im` is zero (exact or inexact).
///
/// # Errors
///
/// Returns `NotARealNumber` if either part is complex.
pub fn make_rectangular(re: &Number, im: &Number) -> Result<Number> {
    if !re.is_real() {
        return Err(Error::not_a_real_number(re));
    }
    if !im.is_real() {
        return Err(Error::not_a_real_number(im));
    }
    Ok(make_complex(re.clone(), im.clone()))
}

/// Collapsing complex constructor for parts already known to be real.
pub(crate) fn make_complex(re: Number, im: Number) -> Number {
    if im.is_zero() {
        re
    } else {
        Number::complex_raw(re, im)
    }
}

// =============================================================================
// Number: predicates
// =============================================================================

impl Number {
    /// Every number is a complex number.
    #[must_use]
    pub const fn is_complex(&self) -> bool {
        true
    }

    /// True unless this is a complex with non-zero imaginary part.
    #[must_use]
    pub fn is_real(&self) -> bool {
        match self {
            Self::Complex(c) => c.im.is_zero(),
            _ => true,
        }
    }

    /// Exact numbers and finite reals.
    #[must_use]
    pub fn is_rational(&self) -> bool {
        match self {
            Self::Fixnum(_) | Self::Bignum(_) | Self::Rational(_) => true,
            Self::Real(d) => d.is_finite(),
            Self::Complex(_) => false,
        }
    }

    /// Exact integers and finite integral reals.
    #[must_use]
    pub fn is_integer(&self) -> bool {
        match self {
            Self::Fixnum(_) | Self::Bignum(_) => true,
            Self::Real(d) => d.is_finite() && d.floor() == *d,
            Self::Rational(_) | Self::Complex(_) => false,
        }
    }

    /// Exact integer of either width.
    #[must_use]
    pub fn is_exact_integer(&self) -> bool {
        matches!(self, Self::Fixnum(_) | Self::Bignum(_))
    }

    /// True for exact numbers; complex numbers need both parts exact.
    #[must_use]
    pub fn is_exact(&self) -> bool {
        match self {
            Self::Fixnum(_) | Self::Bignum(_) | Self::Rational(_) => true,
            Self::Real(_) => false,
            Self::Complex(c) => c.re.is_exact() && c.im.is_exact(),
        }
    }

    /// Negation of [`Number::is_exact`].
    #[must_use]
    pub fn is_inexact(&self) -> bool {
        !self.is_exact()
    }

    /// True for a bignum.
    #[must_use]
    pub fn is_bignum(&self) -> bool {
        matches!(self, Self::Bignum(_))
    }

    /// Numeric zero of any exactness.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Fixnum(i) => *i == 0,
            Self::Real(d) => *d == 0.0,
            Self::Bignum(_) | Self::Rational(_) => false,
            Self::Complex(c) => c.re.is_zero() && c.im.is_zero(),
        }
    }

    /// True if this or either complex part is a NaN.
    #[must_use]
    pub fn is_nan(&self) -> bool {
        match self {
            Self::Real(d) => d.is_nan(),
            Self::Complex(c) => c.re.is_nan() || c.im.is_nan(),
            _ => false,
        }
    }

    /// True if this is (or has a part that is) an infinity.
    #[must_use]
    pub fn is_infinite(&self) -> bool {
        match self {
            Self::Real(d) => d.is_infinite(),
            Self::Complex(c) => c.re.is_infinite() || c.im.is_infinite(),
            _ => false,
        }
    }

    /// True when no part is infinite or NaN.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        match self {
            Self::Real(d) => d.is_finite(),
            Self::Complex(c) => c.re.is_finite() && c.im.is_finite(),
            _ => true,
        }
    }
}

// =============================================================================
// Number: accessors and conversions
// =============================================================================

impl Number {
    /// The real part; the number itself for non-complex values.
    #[must_use]
    pub fn real_part(&self) -> Number {
        match self {
            Self::Complex(c) => c.re.clone(),
            other => other.clone(),
        }
    }

    /// The imaginary part; exact zero for non-complex values.
    #[must_use]
    pub fn imag_part(&self) -> Number {
        match self {
            Self::Complex(c) => c.im.clone(),
            _ => Self::Fixnum(0),
        }
    }

    /// The value as a double, or `None` for a complex number.
    #[must_use]
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            Self::Complex(_) => None,
            other => Some(other.real_to_f64()),
        }
    }

    /// Double value of the real part.
    pub(crate) fn real_to_f64(&self) -> f64 {
        match self {
            #[allow(clippy::cast_precision_loss)]
            Self::Fixnum(i) => *i as f64,
            Self::Bignum(b) => big_to_f64(b),
            Self::Rational(r) => r.to_f64(),
            Self::Real(d) => *d,
            Self::Complex(c) => c.re.real_to_f64(),
        }
    }

    /// The value as a big integer when it is an exact integer.
    #[must_use]
    pub fn exact_integer(&self) -> Option<BigInt> {
        match self {
            Self::Fixnum(i) => Some(BigInt::from(*i)),
            Self::Bignum(b) => Some((**b).clone()),
            _ => None,
        }
    }

    /// Promotes this number to a complex, with exact zero imaginary part
    /// for non-complex values.
    pub(crate) fn to_complex(&self) -> Complex {
        match self {
            Self::Complex(c) => (**c).clone(),
            other => Complex::raw(other.clone(), Self::Fixnum(0)),
        }
    }

    /// Inexact counterpart of this number (`exact->inexact`).
    #[must_use]
    pub fn to_inexact(&self) -> Number {
        match self {
            Self::Real(_) => self.clone(),
            Self::Complex(c) => {
                if c.re.is_inexact() && c.im.is_inexact() {
                    self.clone()
                } else {
                    make_complex(c.re.to_inexact(), c.im.to_inexact())
                }
            }
            other => Self::Real(other.real_to_f64()),
        }
    }

    /// Exact counterpart of this number (`inexact->exact`).
    ///
    /// Doubles convert through their exact binary expansion.
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` for infinities and NaNs.
    pub fn to_exact(&self) -> Result<Number> {
        match self {
            Self::Real(d) => f64_to_exact(*d).ok_or_else(|| {
                Error::out_of_range(format!("{} cannot be made exact", Self::Real(*d)))
            }),
            Self::Complex(c) => {
                if c.re.is_exact() && c.im.is_exact() {
                    Ok(self.clone())
                } else {
                    Ok(Self::complex_raw(c.re.to_exact()?, c.im.to_exact()?))
                }
            }
            other => Ok(other.clone()),
        }
    }

    /// Makes `self` inexact when `inexact` is set.
    pub(crate) fn with_exactness(self, inexact: bool) -> Number {
        if inexact { self.to_inexact() } else { self }
    }
}

// =============================================================================
// Double conversions
// =============================================================================

const F64_EXACT_BITS: u64 = 53;

/// Exponent of the smallest subnormal double.
const F64_MIN_EXP: i64 = -1074;

/// `x · 2^exp`, stepping to avoid spurious intermediate overflow.
pub(crate) fn ldexp(mut x: f64, mut exp: i64) -> f64 {
    const STEP: i64 = 1000;
    let step_up = f64::from_bits(((1023 + STEP) as u64) << 52);
    let step_down = f64::from_bits(((1023 - STEP) as u64) << 52);
    while exp > STEP && x.is_finite() && x != 0.0 {
        x *= step_up;
        exp -= STEP;
    }
    while exp < -STEP && x != 0.0 {
        x *= step_down;
        exp += STEP;
    }
    #[allow(clippy::cast_possible_truncation)]
    let exp = exp as i32;
    x * 2f64.powi(exp)
}

/// Closest double to a big integer; overflows to an infinity.
pub(crate) fn big_to_f64(n: &BigInt) -> f64 {
    n.to_f64().unwrap_or(if n.is_negative() {
        f64::NEG_INFINITY
    } else {
        f64::INFINITY
    })
}

/// Double value of `numer / denom` for a positive `denom`, rounded once to
/// nearest with ties to even.
fn ratio_to_f64(numer: &BigInt, denom: &BigInt) -> f64 {
    if numer.bits() <= F64_EXACT_BITS && denom.bits() <= F64_EXACT_BITS {
        return big_to_f64(numer) / big_to_f64(denom);
    }
    if numer.is_zero() {
        return 0.0;
    }
    let magnitude = numer.abs();
    // 2^exp <= |numer / denom| < 2^(exp + 1)
    #[allow(clippy::cast_possible_wrap)]
    let mut exp = magnitude.bits() as i64 - denom.bits() as i64;
    if scaled(&magnitude, -exp) < *denom {
        exp -= 1;
    }
    // Weight of the last mantissa bit, clamped at the subnormal spacing.
    #[allow(clippy::cast_possible_wrap)]
    let ulp = (exp - (F64_EXACT_BITS as i64 - 1)).max(F64_MIN_EXP);
    let (dividend, divisor) = if ulp <= 0 {
        (scaled(&magnitude, -ulp), denom.clone())
    } else {
        (magnitude, scaled(denom, ulp))
    };
    let (mut mantissa, remainder) = dividend.div_rem(&divisor);
    let round_up = match (remainder << 1_usize).cmp(&divisor) {
        std::cmp::Ordering::Greater => true,
        std::cmp::Ordering::Equal => mantissa.is_odd(),
        std::cmp::Ordering::Less => false,
    };
    if round_up {
        mantissa += 1_u32;
    }
    // At most 2^53, so the conversion is exact.
    #[allow(clippy::cast_precision_loss)]
    let mantissa = mantissa.to_u64().map_or(f64::INFINITY, |m| m as f64);
    let value = ldexp(mantissa, ulp);
    if numer.is_negative() { -value } else { value }
}

/// `n · 2^shift`, truncating when `shift` is negative.
fn scaled(n: &BigInt, shift: i64) -> BigInt {
    let amount = usize::try_from(shift.unsigned_abs()).unwrap_or(usize::MAX);
    if shift >= 0 { n << amount } else { n >> amount }
}

/// Exact value of a finite double.
pub(crate) fn f64_to_exact(d: f64) -> Option<Number> {
    if !d.is_finite() {
        return None;
    }
    let bits = d.to_bits();
    #[allow(clippy::cast_possible_wrap)]
    let biased = ((bits >> 52) & 0x7ff) as i64;
    let fraction = bits & ((1 << 52) - 1);
    let (mantissa, exponent) = if biased == 0 {
        (fraction, -1074)
    } else {
        (fraction | (1 << 52), biased - 1075)
    };
    let mut mantissa = BigInt::from(mantissa);
    if bits >> 63 == 1 {
        mantissa = -mantissa;
    }
    #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    let exact = if exponent >= 0 {
        Number::from_bigint(mantissa << exponent as usize)
    } else {
        Ratio::reduce(mantissa, BigInt::one() << (-exponent) as usize)
    };
    Some(exact)
}

// =============================================================================
// Structural equality
// =============================================================================

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Fixnum(a), Self::Fixnum(b)) => a == b,
            (Self::Bignum(a), Self::Bignum(b)) => a == b,
            (Self::Rational(a), Self::Rational(b)) => a == b,
            (Self::Real(a), Self::Real(b)) => a.to_bits() == b.to_bits(),
            (Self::Complex(a), Self::Complex(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Number {}

impl Hash for Number {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Fixnum(i) => i.hash(state),
            Self::Bignum(b) => b.hash(state),
            Self::Rational(r) => r.hash(state),
            Self::Real(d) => d.to_bits().hash(state),
            Self::Complex(c) => c.hash(state),
        }
    }
}

// =============================================================================
// From implementations
// =============================================================================

macro_rules! from_small_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Number {
                fn from(v: $t) -> Self {
                    Self::Fixnum(i64::from(v))
                }
            }
        )*
    };
}

from_small_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for Number {
    fn from(v: u64) -> Self {
        Self::from_bigint(BigInt::from(v))
    }
}

impl From<i128> for Number {
    fn from(v: i128) -> Self {
        Self::from_bigint(BigInt::from(v))
    }
}

impl From<usize> for Number {
    fn from(v: usize) -> Self {
        Self::from_bigint(BigInt::from(v))
    }
}

impl From<BigInt> for Number {
    fn from(v: BigInt) -> Self {
        Self::from_bigint(v)
    }
}

impl From<f64> for Number {
    fn from(v: f64) -> Self {
        Self::Real(v)
    }
}

impl From<f32> for Number {
    fn from(v: f32) -> Self {
        Self::Real(f64::from(v))
    }
}
