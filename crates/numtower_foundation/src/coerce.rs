//! Pairwise promotion of operands to a common kind.

use num_bigint::BigInt;

use crate::number::{Complex, Number, NumberKind, Ratio};

/// Two operands promoted to the higher-ranked of their kinds.
///
/// The promoted forms are not canonical: an integer becomes `n/1`, a
/// non-complex becomes `x + 0i`.
#[derive(Clone, Debug)]
pub enum Coerced {
    /// Both fixnums.
    Fixnum(i64, i64),
    /// Both integers, at least one a bignum.
    Bignum(BigInt, BigInt),
    /// Both exact, at least one a rational.
    Rational(Ratio, Ratio),
    /// At least one inexact real, neither complex.
    Real(f64, f64),
    /// At least one complex.
    Complex(Complex, Complex),
}

impl Coerced {
    /// The common kind both operands were promoted to.
    #[must_use]
    pub fn kind(&self) -> NumberKind {
        match self {
            Self::Fixnum(..) => NumberKind::Fixnum,
            Self::Bignum(..) => NumberKind::Bignum,
            Self::Rational(..) => NumberKind::Rational,
            Self::Real(..) => NumberKind::Real,
            Self::Complex(..) => NumberKind::Complex,
        }
    }
}

/// Promotes `x` and `y` to their common kind.
#[must_use]
pub fn coerce(x: &Number, y: &Number) -> Coerced {
    match (x, y) {
        (Number::Fixnum(a), Number::Fixnum(b)) => Coerced::Fixnum(*a, *b),

        (Number::Complex(_), _) | (_, Number::Complex(_)) => {
            Coerced::Complex(x.to_complex(), y.to_complex())
        }

        (Number::Real(_), _) | (_, Number::Real(_)) => {
            Coerced::Real(x.real_to_f64(), y.real_to_f64())
        }

        (Number::Bignum(a), Number::Bignum(b)) => Coerced::Bignum((**a).clone(), (**b).clone()),
        (Number::Bignum(a), Number::Fixnum(b)) => Coerced::Bignum((**a).clone(), BigInt::from(*b)),
        (Number::Fixnum(a), Number::Bignum(b)) => Coerced::Bignum(BigInt::from(*a), (**b).clone()),

        (Number::Rational(a), Number::Rational(b)) => {
            Coerced::Rational((**a).clone(), (**b).clone())
        }
        (Number::Rational(a), Number::Fixnum(b)) => {
            Coerced::Rational((**a).clone(), Ratio::from_integer(BigInt::from(*b)))
        }
        (Number::Rational(a), Number::Bignum(b)) => {
            Coerced::Rational((**a).clone(), Ratio::from_integer((**b).clone()))
        }
        (Number::Fixnum(a), Number::Rational(b)) => {
            Coerced::Rational(Ratio::from_integer(BigInt::from(*a)), (**b).clone())
        }
        (Number::Bignum(a), Number::Rational(b)) => {
            Coerced::Rational(Ratio::from_integer((**a).clone()), (**b).clone())
        }
    }
}

/// Promotes `x` and `y` and returns them as numbers with their common kind.
///
/// The results are intermediate operands, not canonical values: a promoted
/// fixnum may come back as a `Bignum` that fits in a fixnum, an integer as
/// an `n/1` rational, and a real as a complex with an exact zero imaginary
/// part. Predicates such as [`Number::is_integer`] describe the
/// representation of such values, so feed them to arithmetic rather than
/// returning them to a caller.
#[must_use]
pub fn coerce_numbers(x: &Number, y: &Number) -> (Number, Number, NumberKind) {
    let coerced = coerce(x, y);
    let kind = coerced.kind();
    let (a, b) = match coerced {
        Coerced::Fixnum(a, b) => (Number::Fixnum(a), Number::Fixnum(b)),
        Coerced::Bignum(a, b) => (big(a), big(b)),
        Coerced::Rational(a, b) => (rat(a), rat(b)),
        Coerced::Real(a, b) => (Number::Real(a), Number::Real(b)),
        Coerced::Complex(a, b) => {
            let (ar, ai) = a.into_parts();
            let (br, bi) = b.into_parts();
            (Number::complex_raw(ar, ai), Number::complex_raw(br, bi))
        }
    };
    (a, b, kind)
}

fn big(n: BigInt) -> Number {
    Number::Bignum(std::sync::Arc::new(n))
}

fn rat(r: Ratio) -> Number {
    Number::Rational(std::sync::Arc::new(r))
}
