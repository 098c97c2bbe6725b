//! Property tests: the reader inverts the printer

use numtower_foundation::{
    Number, NumberConfig, make_rectangular, number_to_string_with, parse_number_with,
};
use proptest::prelude::*;

fn radix() -> impl Strategy<Value = i64> {
    prop::sample::select(vec![2_i64, 8, 10, 16])
}

fn finite_double() -> impl Strategy<Value = f64> {
    use prop::num::f64::{NEGATIVE, NORMAL, POSITIVE, SUBNORMAL, ZERO};
    POSITIVE | NEGATIVE | NORMAL | SUBNORMAL | ZERO
}

fn reread(n: &Number, radix: i64, config: &NumberConfig) -> Option<Number> {
    let text = number_to_string_with(n, radix, config).unwrap();
    parse_number_with(&text, radix, config).unwrap()
}

proptest! {
    #[test]
    fn fixnums_round_trip_in_every_radix(i: i64, radix in radix()) {
        let n = Number::from(i);
        prop_assert_eq!(reread(&n, radix, &NumberConfig::default()), Some(n));
    }

    #[test]
    fn bignums_round_trip_in_every_radix(hi: i64, lo: u64, radix in radix()) {
        let n = Number::from((i128::from(hi) << 64) | i128::from(lo));
        prop_assert_eq!(reread(&n, radix, &NumberConfig::default()), Some(n));
    }

    #[test]
    fn rationals_round_trip_in_every_radix(
        numer: i64,
        denom in 1_i64..=i64::MAX,
        radix in radix(),
    ) {
        let q = Number::rational(numer, denom).unwrap();
        prop_assert_eq!(reread(&q, radix, &NumberConfig::default()), Some(q));
    }

    #[test]
    fn finite_reals_round_trip_at_full_precision(d in finite_double()) {
        let n = Number::from(d);
        prop_assert_eq!(reread(&n, 10, &NumberConfig::round_trip()), Some(n));
    }

    #[test]
    fn exact_complex_round_trips(
        re: i32,
        im in any::<i32>().prop_filter("non-zero", |i| *i != 0),
        radix in radix(),
    ) {
        let z = make_rectangular(&Number::from(re), &Number::from(im)).unwrap();
        prop_assert_eq!(reread(&z, radix, &NumberConfig::default()), Some(z));
    }
}
