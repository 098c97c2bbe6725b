//! Integration tests for arithmetic across the tower
//!
//! Exercises promotion between fixnums, bignums, rationals, reals and
//! complex numbers through the public arithmetic entry points.

use numtower_foundation::{
    Coerced, ErrorKind, Number, NumberKind, add, add2, coerce, div, div2, expt, floor, gcd,
    integer_length, lcm, make_rectangular, modulo, mul, mul2, num_eq_all, num_lt, quotient,
    remainder, round, sub, sub2,
};

fn n(i: i64) -> Number {
    Number::from(i)
}

fn q(a: i64, b: i64) -> Number {
    Number::rational(a, b).unwrap()
}

fn c(re: i64, im: i64) -> Number {
    make_rectangular(&n(re), &n(im)).unwrap()
}

// =============================================================================
// Promotion
// =============================================================================

#[test]
fn coerce_picks_the_higher_kind() {
    assert_eq!(coerce(&n(1), &n(2)).kind(), NumberKind::Fixnum);
    assert_eq!(coerce(&n(1), &Number::from(u64::MAX)).kind(), NumberKind::Bignum);
    assert_eq!(coerce(&Number::from(u64::MAX), &q(1, 2)).kind(), NumberKind::Rational);
    assert_eq!(coerce(&q(1, 2), &Number::from(0.5)).kind(), NumberKind::Real);
    assert_eq!(coerce(&Number::from(0.5), &c(1, 1)).kind(), NumberKind::Complex);
}

#[test]
fn coerce_keeps_values() {
    let Coerced::Real(a, b) = coerce(&q(1, 4), &Number::from(2.0)) else {
        panic!("expected reals");
    };
    assert!((a - 0.25).abs() < f64::EPSILON);
    assert!((b - 2.0).abs() < f64::EPSILON);
}

#[test]
fn results_are_demoted_to_the_simplest_kind() {
    let big = add2(&n(i64::MAX), &n(1));
    assert_eq!(big.kind(), NumberKind::Bignum);
    assert_eq!(sub2(&big, &n(2)).kind(), NumberKind::Fixnum);
    assert_eq!(mul2(&q(3, 4), &n(4)).kind(), NumberKind::Fixnum);
    assert_eq!(add2(&c(1, 1), &c(0, -1)).kind(), NumberKind::Fixnum);
}

#[test]
fn inexact_contagion() {
    let sum = add(&[n(1), q(1, 2), Number::from(0.25)]);
    assert_eq!(sum, Number::from(1.75));
    assert!(sum.is_inexact());
    assert!(add(&[n(1), q(1, 2)]).is_exact());
}

// =============================================================================
// Variadic forms
// =============================================================================

#[test]
fn variadic_forms_fold_left() {
    assert_eq!(sub(&[n(100), n(1), q(1, 2)]).unwrap(), q(197, 2));
    assert_eq!(div(&[n(1), n(2), n(3)]).unwrap(), q(1, 6));
    assert_eq!(mul(&[q(1, 2), q(2, 3), q(3, 4)]), q(1, 4));
}

#[test]
fn exact_division_by_zero_names_the_primitive() {
    let err = div(&[n(1), n(0)]).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::DivideByZero(_)));
    assert_eq!(err.context.unwrap().primitive(), Some("/"));
}

#[test]
fn factorial_grows_into_bignums() {
    let product = mul(&(1..=25).map(n).collect::<Vec<_>>());
    assert_eq!(product.kind(), NumberKind::Bignum);
    assert_eq!(product.to_string(), "15511210043330985984000000");
    let back = div(&[product, mul(&(2..=25).map(n).collect::<Vec<_>>())]).unwrap();
    assert_eq!(back, n(1));
}

#[test]
fn comparisons_across_kinds() {
    assert!(num_lt(&[q(-1, 2), n(0), Number::from(0.5), Number::from(u64::MAX)]).unwrap());
    assert!(num_eq_all(&[q(6, 3), n(2), Number::from(2.0), c(2, 0)]).unwrap());
}

// =============================================================================
// Integer operations
// =============================================================================

#[test]
fn division_identity_holds_for_bignums() {
    let x = expt(&n(7), &n(40)).unwrap();
    let y = n(-1_000_003);
    let quo = quotient(&x, &y).unwrap();
    let rem = remainder(&x, &y).unwrap();
    assert_eq!(add2(&mul2(&quo, &y), &rem), x);
    let m = modulo(&x, &y).unwrap();
    assert!(num_lt(&[y, m.clone()]).unwrap());
    assert!(num_lt(&[m, n(1)]).unwrap());
}

#[test]
fn gcd_lcm_relation() {
    let a = n(2 * 3 * 5 * 7);
    let b = n(3 * 7 * 11);
    let g = gcd(&[a.clone(), b.clone()]).unwrap();
    let l = lcm(&[a.clone(), b.clone()]).unwrap();
    assert_eq!(g, n(21));
    assert_eq!(mul2(&g, &l), mul2(&a, &b));
}

#[test]
fn rounding_rationals_to_integers() {
    assert_eq!(round(&q(5, 2)).unwrap(), n(2));
    assert_eq!(round(&q(7, 2)).unwrap(), n(4));
    assert_eq!(floor(&q(-7, 2)).unwrap(), n(-4));
}

#[test]
fn integer_length_of_powers_of_two() {
    for bits in [1_i64, 10, 62, 63, 64, 200] {
        let power = expt(&n(2), &n(bits)).unwrap();
        assert_eq!(integer_length(&power).unwrap(), u64::try_from(bits).unwrap() + 1);
        let below = sub2(&power, &n(1));
        assert_eq!(integer_length(&below).unwrap(), u64::try_from(bits).unwrap());
    }
}

#[test]
fn exactness_conversions() {
    assert_eq!(Number::from(0.5).to_exact().unwrap(), q(1, 2));
    assert_eq!(q(1, 4).to_inexact(), Number::from(0.25));
    assert!(Number::from(f64::INFINITY).to_exact().is_err());
    assert_eq!(Number::from(1e20).to_exact().unwrap().kind(), NumberKind::Bignum);
}

#[test]
fn division_by_inexact_zero() {
    assert_eq!(div2(&n(1), &Number::from(-0.0)).unwrap(), Number::from(f64::NEG_INFINITY));
}
