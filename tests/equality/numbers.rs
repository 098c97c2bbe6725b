//! Integration tests for the predicates on numbers

use numtower_equality::{Datum, is_eq, is_equal, is_eqv};
use numtower_foundation::{Number, add2, div2, parse_number};

fn num(text: &str) -> Datum {
    Datum::from(parse_number(text, 10).unwrap().unwrap())
}

#[test]
fn eqv_requires_equal_exactness() {
    assert!(is_eqv(&num("1/2"), &num("2/4")));
    assert!(!is_eqv(&num("1/2"), &num("0.5")));
    assert!(is_eqv(&num("#i1/2"), &num("0.5")));
    assert!(!is_eqv(&num("1"), &num("1.0")));
    assert!(is_eqv(&num("1+2i"), &num("1+2i")));
    assert!(!is_eqv(&num("1+2i"), &num("1.0+2i")));
}

#[test]
fn eqv_on_computed_bignums() {
    let big = Number::from(i64::MAX);
    let a = add2(&big, &Number::from(1));
    let b = add2(&Number::from(1), &big);
    assert!(!is_eq(&Datum::from(a.clone()), &Datum::from(b.clone())));
    assert!(is_eqv(&Datum::from(a), &Datum::from(b)));
}

#[test]
fn eqv_on_special_reals() {
    assert!(is_eqv(&num("+inf.0"), &num("+inf.0")));
    assert!(!is_eqv(&num("+inf.0"), &num("-inf.0")));
    assert!(is_eqv(&num("+nan.0"), &num("+nan.0")));
    assert!(is_eqv(&num("0.0"), &num("-0.0")));
}

#[test]
fn eq_on_reals_is_bitwise() {
    assert!(is_eq(&num("1.5"), &num("1.5")));
    assert!(!is_eq(&num("0.0"), &num("-0.0")));
}

#[test]
fn equal_on_numbers_is_eqv() {
    let third = div2(&Number::from(1), &Number::from(3)).unwrap();
    assert!(is_equal(&Datum::from(third), &num("1/3")));
    assert!(!is_equal(&num("2"), &num("2.0")));
}

#[test]
fn numbers_are_never_equal_to_other_kinds() {
    assert!(!is_eqv(&num("0"), &Datum::from(false)));
    assert!(!is_equal(&num("0"), &Datum::Nil));
    assert!(!is_equal(&num("65"), &Datum::from('A')));
}
