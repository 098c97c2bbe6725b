//! Integration tests for the printer

use numtower_foundation::{
    ErrorKind, Number, NumberConfig, make_rectangular, number_to_string, number_to_string_with,
    parse_number,
};

fn show(n: &Number) -> String {
    number_to_string_with(n, 10, &NumberConfig::default()).unwrap()
}

#[test]
fn exact_numbers_print_exactly() {
    assert_eq!(show(&Number::from(0)), "0");
    assert_eq!(show(&Number::rational(-10, 4).unwrap()), "-5/2");
    let big = parse_number("-123456789012345678901234567890", 10).unwrap().unwrap();
    assert_eq!(show(&big), "-123456789012345678901234567890");
}

#[test]
fn inexact_integers_keep_a_point() {
    assert_eq!(show(&Number::from(42.0)), "42.0");
    assert_eq!(show(&Number::from(-3.0)), "-3.0");
}

#[test]
fn precision_is_configurable() {
    let short = NumberConfig::default().with_real_precision(4).unwrap();
    let third = Number::from(1.0 / 3.0);
    assert_eq!(number_to_string_with(&third, 10, &short).unwrap(), "0.3333");
    let full = NumberConfig::round_trip();
    assert_eq!(number_to_string_with(&Number::from(0.1), 10, &full).unwrap(), "0.10000000000000001");
    assert!(NumberConfig::default().with_real_precision(0).is_err());
    assert!(NumberConfig::default().with_real_precision(51).is_err());
}

#[test]
fn complex_numbers_join_their_parts() {
    let z = make_rectangular(&Number::from(-1), &Number::rational(1, 3).unwrap()).unwrap();
    assert_eq!(show(&z), "-1+1/3i");
    let w = make_rectangular(&Number::from(0.5), &Number::from(f64::NEG_INFINITY)).unwrap();
    assert_eq!(show(&w), "0.5-inf.0i");
    let v = make_rectangular(&Number::from(0.5), &Number::from(f64::NAN)).unwrap();
    assert_eq!(show(&v), "0.5+nan.0i");
}

#[test]
fn non_decimal_radices() {
    let z = make_rectangular(&Number::from(10), &Number::from(-11)).unwrap();
    assert_eq!(number_to_string(&z, 16).unwrap(), "a-bi");
    assert_eq!(number_to_string(&Number::rational(5, 8).unwrap(), 8).unwrap(), "5/10");

    let inexact = make_rectangular(&Number::from(1), &Number::from(0.5)).unwrap();
    let err = number_to_string(&inexact, 2).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::IncorrectRadix { radix: 2, .. }));
}

#[test]
fn display_matches_radix_ten() {
    let z = make_rectangular(&Number::from(3), &Number::from(4)).unwrap();
    assert_eq!(z.to_string(), "3+4i");
    assert_eq!(format!("{}", Number::from(u64::MAX)), "18446744073709551615");
}
