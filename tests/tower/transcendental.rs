//! Integration tests for transcendental functions, `sqrt` and `expt`

use std::f64::consts::{E, FRAC_PI_2, FRAC_PI_4, PI};

use numtower_foundation::{
    ErrorKind, Number, NumberKind, acos, angle, asin, atan, cos, exp, expt, log, magnitude,
    make_polar, make_rectangular, sin, sqrt,
};

fn n(i: i64) -> Number {
    Number::from(i)
}

fn q(a: i64, b: i64) -> Number {
    Number::rational(a, b).unwrap()
}

fn close(actual: &Number, expected: f64) -> bool {
    actual
        .to_f64()
        .is_some_and(|a| (a - expected).abs() <= 1e-12 * expected.abs().max(1.0))
}

// =============================================================================
// Exact results
// =============================================================================

#[test]
fn exact_inputs_with_exact_answers_stay_exact() {
    assert_eq!(exp(&n(0)).unwrap(), n(1));
    assert_eq!(log(&n(1)).unwrap(), n(0));
    assert_eq!(sin(&n(0)).unwrap(), n(0));
    assert_eq!(sqrt(&q(9, 16)).unwrap(), q(3, 4));
    assert_eq!(expt(&q(2, 3), &n(3)).unwrap(), q(8, 27));
    assert_eq!(expt(&n(2), &n(-2)).unwrap(), q(1, 4));
    assert_eq!(expt(&n(0), &n(0)).unwrap(), n(1));
}

#[test]
fn expt_of_large_exponents() {
    let big = expt(&n(10), &n(100)).unwrap();
    assert_eq!(big.kind(), NumberKind::Bignum);
    assert_eq!(big.to_string().len(), 101);
    assert_eq!(sqrt(&big).unwrap(), expt(&n(10), &n(50)).unwrap());
}

#[test]
fn expt_of_exact_zero_to_negative_power() {
    let err = expt(&n(0), &n(-1)).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::DivideByZero(_)));
}

// =============================================================================
// Inexact and complex results
// =============================================================================

#[test]
fn inexact_results() {
    assert!(close(&exp(&n(1)).unwrap(), E));
    assert!(close(&log(&Number::from(E)).unwrap(), 1.0));
    assert!(close(&cos(&Number::from(PI)).unwrap(), -1.0));
    assert!(close(&atan(&n(1)).unwrap(), FRAC_PI_4));
    assert!(close(&expt(&n(2), &Number::from(0.5)).unwrap(), 2.0_f64.sqrt()));
}

#[test]
fn negative_inputs_go_complex() {
    let root = sqrt(&n(-9)).unwrap();
    assert_eq!(root, make_rectangular(&n(0), &n(3)).unwrap());

    let l = log(&n(-1)).unwrap();
    assert_eq!(l.kind(), NumberKind::Complex);
    assert!(close(&l.imag_part(), PI));

    let a = asin(&n(2)).unwrap();
    assert_eq!(a.kind(), NumberKind::Complex);
    assert!(close(&a.real_part(), FRAC_PI_2));

    let half = expt(&n(-1), &q(1, 2)).unwrap();
    assert!(close(&half.imag_part(), 1.0));
    assert!(half.real_part().to_f64().unwrap().abs() < 1e-12);
}

#[test]
fn acos_of_one_is_zero() {
    assert!(acos(&n(1)).unwrap().is_zero());
}

#[test]
fn polar_round_trip() {
    let z = make_polar(&n(2), &Number::from(FRAC_PI_4)).unwrap();
    assert!(close(&magnitude(&z).unwrap(), 2.0));
    assert!(close(&angle(&z).unwrap(), FRAC_PI_4));
}

#[test]
fn magnitude_of_exact_complex_is_exact_when_possible() {
    let z = make_rectangular(&n(3), &n(-4)).unwrap();
    assert_eq!(magnitude(&z).unwrap(), n(5));
    assert_eq!(magnitude(&n(-7)).unwrap(), n(7));
    assert_eq!(angle(&n(5)).unwrap(), n(0));
}
