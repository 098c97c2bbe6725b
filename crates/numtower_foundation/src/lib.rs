//! Numeric tower, arithmetic, literal syntax, and float codec for numtower.
//!
//! This crate provides:
//! - [`Number`] - The five-kind numeric value (fixnum, bignum, rational, real, complex)
//! - [`coerce`] - Promotion of operand pairs to a common kind
//! - Arithmetic, comparison, and integer division ([`arith`], [`compare`], [`integer`])
//! - Transcendental functions, `sqrt`, and `expt` ([`transcend`])
//! - The literal reader and printer ([`parse_number`], [`number_to_string`])
//! - IEEE double introspection and the NaN codec ([`float`])
//! - [`Error`] - Rich error types with context
//! - [`NumberConfig`] - Print precision and underscore toggles

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod arith;
pub mod coerce;
pub mod compare;
pub mod config;
pub mod error;
pub mod float;
pub mod integer;
pub mod number;
pub mod printer;
pub mod reader;
pub mod transcend;

pub use arith::{abs, add, add2, div, div2, mul, mul2, negate, sub, sub2};
pub use coerce::{Coerced, coerce, coerce_numbers};
pub use compare::{
    Parity, compare, is_even, is_negative, is_odd, is_positive, max, min, num_eq, num_eq_all,
    num_ge, num_gt, num_le, num_lt, parity,
};
pub use config::NumberConfig;
pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use float::{
    DecodedFloat, Significand, decode_float, encode_float, make_nan, nan_equal, nan_negative,
    nan_payload, nan_quiet,
};
pub use integer::{
    ceiling, denominator, floor, gcd, integer_length, lcm, modulo, numerator, quotient, remainder,
    round, truncate,
};
pub use number::{Complex, Number, NumberKind, Ratio, make_rational, make_rectangular};
pub use printer::{number_to_string, number_to_string_with};
pub use reader::{parse_number, parse_number_with};
pub use transcend::{
    acos, acosh, angle, asin, asinh, atan, atan2, atanh, cos, cosh, exp, expt, log, log_base,
    magnitude, make_polar, sin, sinh, sqrt, tan, tanh,
};
