//! Integration tests for the literal reader

use numtower_foundation::{
    ErrorKind, Number, NumberConfig, NumberKind, make_rectangular, parse_number, parse_number_with,
};

fn read(text: &str) -> Option<Number> {
    parse_number(text, 10).unwrap()
}

fn n(i: i64) -> Number {
    Number::from(i)
}

#[test]
fn each_kind_has_a_literal() {
    assert_eq!(read("12").map(|x| x.kind()), Some(NumberKind::Fixnum));
    assert_eq!(read("99999999999999999999").map(|x| x.kind()), Some(NumberKind::Bignum));
    assert_eq!(read("-7/3").map(|x| x.kind()), Some(NumberKind::Rational));
    assert_eq!(read("2.5e-3").map(|x| x.kind()), Some(NumberKind::Real));
    assert_eq!(read("1.5-2i").map(|x| x.kind()), Some(NumberKind::Complex));
}

#[test]
fn fixnum_boundary() {
    assert_eq!(read("9223372036854775807"), Some(n(i64::MAX)));
    assert_eq!(read("-9223372036854775808"), Some(n(i64::MIN)));
    assert_eq!(read("9223372036854775808").map(|x| x.kind()), Some(NumberKind::Bignum));
}

#[test]
fn radix_argument_sets_the_default() {
    assert_eq!(parse_number("777", 8).unwrap(), Some(n(511)));
    assert_eq!(parse_number("101", 2).unwrap(), Some(n(5)));
    assert_eq!(parse_number("2", 2).unwrap(), None);
    assert_eq!(parse_number("#d99", 2).unwrap(), Some(n(99)));
}

#[test]
fn exactness_prefixes() {
    assert_eq!(read("#e1.5"), Some(Number::rational(3, 2).unwrap()));
    assert_eq!(read("#i1/4"), Some(Number::from(0.25)));
    assert_eq!(read("#e#x1/2"), Some(Number::rational(1, 2).unwrap()));
    let z = read("#e1.5+2.5i").unwrap();
    assert!(z.is_exact());
}

#[test]
fn complex_parts_of_mixed_exactness() {
    let z = read("1/2+0.5i").unwrap();
    assert_eq!(
        z,
        make_rectangular(&Number::rational(1, 2).unwrap(), &Number::from(0.5)).unwrap()
    );
    assert!(z.real_part().is_exact());
    assert!(z.imag_part().is_inexact());
}

#[test]
fn rejected_literals() {
    for text in ["1/0", "#e+nan.0", "1+", "--1", "1e1.5", "#x1g", "+i1", "1ii"] {
        assert_eq!(read(text), None, "{text:?}");
    }
}

#[test]
fn underscore_setting_is_per_call() {
    let strict = NumberConfig::strict();
    assert_eq!(parse_number_with("10_000", 10, &strict).unwrap(), None);
    let relaxed = NumberConfig::default();
    assert_eq!(parse_number_with("10_000", 10, &relaxed).unwrap(), Some(n(10_000)));
}

#[test]
fn unsupported_radix_is_an_error_not_a_non_number() {
    let err = parse_number("10", 36).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::IncorrectRadix { radix: 36, .. }));
}

#[test]
fn from_str_wraps_failure_in_bad_number() {
    assert_eq!("#x-1A".parse::<Number>().unwrap(), n(-26));
    let err = "1.2.3".parse::<Number>().unwrap_err();
    assert!(matches!(err.kind, ErrorKind::BadNumber(ref text) if text == "\"1.2.3\""));
}
