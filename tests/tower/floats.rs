//! Integration tests for IEEE double introspection
//!
//! Tests decode-float/encode-float and the NaN field accessors together
//! with the reader and printer.

use numtower_foundation::{
    ErrorKind, Number, Significand, add2, decode_float, encode_float, make_nan, nan_equal,
    nan_negative, nan_payload, nan_quiet, number_to_string, parse_number,
};

// =============================================================================
// decode-float / encode-float
// =============================================================================

#[test]
fn decode_then_encode_is_exact() {
    for d in [0.1, -2.5, 1e-310, 6.02e23, f64::MIN_POSITIVE] {
        let decoded = decode_float(&Number::from(d)).unwrap();
        let encoded = encode_float(
            &decoded.significand,
            &Number::from(decoded.exponent),
            &Number::from(decoded.sign),
        )
        .unwrap();
        assert!(encoded.is_exact(), "{d}");
        assert_eq!(encoded.to_inexact(), Number::from(d), "{d}");
    }
}

#[test]
fn decode_of_an_exact_rational_rounds_first() {
    let third = Number::rational(1, 3).unwrap();
    let decoded = decode_float(&third).unwrap();
    let d = 1.0_f64 / 3.0;
    let expected = decode_float(&Number::from(d)).unwrap();
    assert_eq!(decoded, expected);
}

#[test]
fn large_rationals_convert_to_the_closest_double() {
    // (2^63 + 2^10) + 1/3^40 lies just above the midpoint of two doubles.
    let q = parse_number("112134671628500870800794916144168338433/12157665459056928801", 10)
        .unwrap()
        .unwrap();
    let closest = Number::from(9_223_372_036_854_777_856.0);
    assert_eq!(q.to_inexact(), closest);
    assert_eq!(add2(&q, &Number::from(0.0)), closest);
    assert_eq!(decode_float(&q).unwrap(), decode_float(&closest).unwrap());
}

#[test]
fn decode_rejects_complex() {
    let z = parse_number("1+i", 10).unwrap().unwrap();
    let err = decode_float(&z).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::NotARealNumber(_)));
}

#[test]
fn encode_special_significands() {
    let inf = encode_float(&Significand::Infinite, &Number::from(0), &Number::from(-1)).unwrap();
    assert_eq!(inf, Number::from(f64::NEG_INFINITY));
    let nan = encode_float(&Significand::Nan, &Number::from(0), &Number::from(1)).unwrap();
    assert!(nan.is_nan());
}

#[test]
fn encode_range_checks() {
    let too_big = Significand::Finite(Number::from(1_u64 << 53));
    let err = encode_float(&too_big, &Number::from(0), &Number::from(1)).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::OutOfRange(_)));

    let one = Significand::Finite(Number::from(1));
    assert!(encode_float(&one, &Number::from(972), &Number::from(1)).is_err());
    assert!(encode_float(&one, &Number::from(-1075), &Number::from(1)).is_err());

    let err = encode_float(&one, &Number::from(0.5), &Number::from(1)).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::NotAnInteger(_)));
}

// =============================================================================
// NaN codec
// =============================================================================

#[test]
fn nan_fields_survive_arithmetic_free_paths() {
    let nan = make_nan(true, true, 0x1234).unwrap();
    assert!(nan_negative(&nan).unwrap());
    assert!(nan_quiet(&nan).unwrap());
    assert_eq!(nan_payload(&nan).unwrap(), 0x1234);
    assert!(nan_equal(&nan, &nan.clone()).unwrap());
}

#[test]
fn nan_sign_is_visible_in_print() {
    let negative = make_nan(true, true, 0).unwrap();
    assert_eq!(number_to_string(&negative, 10).unwrap(), "-nan.0");
    let positive = make_nan(false, false, 1).unwrap();
    assert_eq!(number_to_string(&positive, 10).unwrap(), "+nan.0");
}

#[test]
fn parsed_nans_are_signaling_with_zero_payload() {
    let nan = parse_number("+nan.0", 10).unwrap().unwrap();
    assert!(!nan_quiet(&nan).unwrap());
    assert_eq!(nan_payload(&nan).unwrap(), 0);
    assert!(nan_equal(&nan, &make_nan(false, false, 0).unwrap()).unwrap());
}
