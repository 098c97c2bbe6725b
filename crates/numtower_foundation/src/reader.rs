//! Number reader: literal text to canonical values.
//!
//! ```text
//! number  := prefix* real ( ("+" | "-") ureal "i" | ("+i" | "-i") | "@" real )?
//!          | prefix* ("+" | "-") ureal "i"
//!          | prefix* ("+i" | "-i")
//! prefix  := "#e" | "#i" | "#b" | "#o" | "#d" | "#x"   (at most one of each kind)
//! real    := sign? digits ("." digits)? (marker sign? digits)? ("/" digits)?
//!          | ("+" | "-") ("inf.0" | "nan.0")
//! marker  := e s f d l (either case)
//! ```
//!
//! A `#` digit after the first stands for an unknown `0` and makes the
//! literal inexact. Underscores may separate digits when the configuration
//! allows it. Malformed input reads as `None`, never as an error.

use std::str::FromStr;

use log::trace;
use num_bigint::BigInt;

use crate::arith::div2;
use crate::config::{self, NumberConfig};
use crate::error::{Error, Result};
use crate::float::nan_from_fields;
use crate::number::{Number, Ratio, make_complex, make_rational};
use crate::printer::check_radix;
use crate::transcend::make_polar;

const EXPONENT_MARKERS: &[u8] = b"eEsSfFdDlL";

/// `(string->number text radix)` with the process-wide configuration.
///
/// `radix` is the default radix; a `#b`, `#o`, `#d` or `#x` prefix in the
/// text overrides it.
///
/// # Errors
///
/// Returns `IncorrectRadix` for a radix other than 2, 8, 10 or 16. Text that
/// is not a number gives `Ok(None)`.
pub fn parse_number(text: &str, radix: i64) -> Result<Option<Number>> {
    parse_number_with(text, radix, &config::current())
}

/// `(string->number text radix)` with an explicit configuration.
///
/// # Errors
///
/// See [`parse_number`].
pub fn parse_number_with(text: &str, radix: i64, config: &NumberConfig) -> Result<Option<Number>> {
    let radix = check_radix(radix).map_err(|e| e.in_primitive("string->number"))?;
    let parsed = Reader::new(text, radix, config).read();
    if parsed.is_none() {
        trace!("{text:?} does not denote a number");
    }
    Ok(parsed)
}

impl FromStr for Number {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_number(s, 10)?.ok_or_else(|| Error::bad_number(format!("{s:?}")))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Exactness {
    Unspecified,
    Exact,
    Inexact,
}

struct Reader<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
    radix: u32,
    exactness: Exactness,
    accept_underscores: bool,
}

impl<'a> Reader<'a> {
    fn new(text: &'a str, radix: u32, config: &NumberConfig) -> Self {
        Self {
            text,
            bytes: text.as_bytes(),
            pos: 0,
            radix,
            exactness: Exactness::Unspecified,
            accept_underscores: config.accept_underscores,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn eat(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn is_digit(&self, c: u8) -> bool {
        let value = match c {
            b'0'..=b'9' => c - b'0',
            b'a'..=b'f' => c - b'a' + 10,
            b'A'..=b'F' => c - b'A' + 10,
            b'#' => 0,
            _ => return false,
        };
        u32::from(value) < self.radix
    }

    fn at_digit_or_underscore(&self) -> bool {
        self.peek().is_some_and(|c| c == b'_' || self.is_digit(c))
    }

    fn inexact(&self) -> bool {
        self.exactness == Exactness::Inexact
    }

    fn read(mut self) -> Option<Number> {
        self.read_prefixes()?;

        let signed = matches!(self.peek(), Some(b'+' | b'-'));
        let rest = &self.text[self.pos..];
        if rest == "+i" || rest == "-i" {
            return Some(make_complex(
                Number::Fixnum(0).with_exactness(self.inexact()),
                self.unit(rest == "-i"),
            ));
        }

        let mut number = self.read_part()?;
        match self.peek() {
            Some(sign @ (b'+' | b'-')) => {
                if self.peek_at(1) == Some(b'i') && self.pos + 2 == self.bytes.len() {
                    self.pos += 2;
                    number = make_complex(number, self.unit(sign == b'-'));
                } else {
                    let imag = self.read_part()?;
                    if !self.eat(b'i') {
                        return None;
                    }
                    number = make_complex(number, imag);
                }
            }
            Some(b'@') => {
                self.pos += 1;
                let angle = self.read_part()?;
                number = make_polar(&number, &angle).ok()?;
            }
            Some(b'i') if signed => {
                self.pos += 1;
                number = make_complex(Number::Fixnum(0).with_exactness(self.inexact()), number);
            }
            _ => {}
        }

        (self.pos == self.bytes.len()).then_some(number)
    }

    /// Up to two `#` prefixes, at most one radix and one exactness.
    fn read_prefixes(&mut self) -> Option<()> {
        let mut radix_seen = false;
        for _ in 0..2 {
            if self.peek() != Some(b'#') {
                break;
            }
            let marker = self.peek_at(1)?.to_ascii_lowercase();
            self.pos += 2;
            match marker {
                b'e' | b'i' if self.exactness == Exactness::Unspecified => {
                    self.exactness = if marker == b'e' {
                        Exactness::Exact
                    } else {
                        Exactness::Inexact
                    };
                }
                b'b' | b'o' | b'd' | b'x' if !radix_seen => {
                    radix_seen = true;
                    self.radix = match marker {
                        b'b' => 2,
                        b'o' => 8,
                        b'd' => 10,
                        _ => 16,
                    };
                }
                _ => return None,
            }
        }
        Some(())
    }

    fn unit(&self, negative: bool) -> Number {
        Number::Fixnum(if negative { -1 } else { 1 }).with_exactness(self.inexact())
    }

    /// A real, optionally followed by `/` and a denominator.
    fn read_part(&mut self) -> Option<Number> {
        let numer = self.read_real()?;
        if !self.eat(b'/') {
            return Some(numer);
        }
        let denom = self.read_real()?;
        if numer.is_exact_integer() && denom.is_exact_integer() {
            if denom.is_zero() {
                return None;
            }
            make_rational(&numer, &denom).ok()
        } else if self.inexact() {
            div2(&numer, &denom).ok()
        } else {
            None
        }
    }

    fn read_special(&mut self, negative: bool) -> Option<Option<Number>> {
        let rest = &self.bytes[self.pos..];
        let value = if rest.starts_with(b"inf.0") {
            if negative { f64::NEG_INFINITY } else { f64::INFINITY }
        } else if rest.starts_with(b"nan.0") {
            nan_from_fields(negative, false, 0)
        } else {
            return None;
        };
        self.pos += 5;
        Some((self.exactness != Exactness::Exact).then_some(Number::Real(value)))
    }

    fn read_real(&mut self) -> Option<Number> {
        let start = self.pos;
        let negative = match self.peek() {
            Some(b'-') => {
                self.pos += 1;
                true
            }
            Some(b'+') => {
                self.pos += 1;
                false
            }
            _ => false,
        };
        if self.pos > start {
            if let Some(special) = self.read_special(negative) {
                return special;
            }
        }
        if matches!(self.peek(), Some(b'#' | b'_') | None) {
            return None;
        }

        let mut integral = true;
        let mut any_digit = false;
        let int_start = self.pos;
        while self.at_digit_or_underscore() {
            integral &= self.peek() != Some(b'#');
            any_digit = true;
            self.pos += 1;
        }
        let int_range = (int_start, self.pos);

        let mut frac_range = None;
        if self.eat(b'.') {
            integral = false;
            let frac_start = self.pos;
            while self.at_digit_or_underscore() {
                any_digit = true;
                self.pos += 1;
            }
            frac_range = Some((frac_start, self.pos));
        }
        if !any_digit {
            return None;
        }

        let mut exp_range = None;
        if self.peek().is_some_and(|c| EXPONENT_MARKERS.contains(&c)) {
            integral = false;
            self.pos += 1;
            let exp_start = self.pos;
            if matches!(self.peek(), Some(b'+' | b'-')) {
                self.pos += 1;
            }
            if !self.at_digit_or_underscore() {
                return None;
            }
            while self.at_digit_or_underscore() {
                self.pos += 1;
            }
            exp_range = Some((exp_start, self.pos));
        }

        let token = &self.text[start..self.pos];
        if token.contains('_') && !(self.accept_underscores && self.underscores_valid(token)) {
            return None;
        }

        let int_digits = self.digits(int_range);
        if integral {
            let magnitude = BigInt::parse_bytes(int_digits.as_bytes(), self.radix)?;
            let value = if negative { -magnitude } else { magnitude };
            return Some(Number::from_bigint(value).with_exactness(self.inexact()));
        }
        if self.radix != 10 {
            return None;
        }

        let frac_digits = frac_range.map(|r| self.digits(r)).unwrap_or_default();
        let exp_digits = exp_range.map(|r| self.digits(r));
        if self.exactness == Exactness::Exact {
            return exact_decimal(negative, &int_digits, &frac_digits, exp_digits.as_deref());
        }

        let mut literal = String::with_capacity(token.len() + 1);
        if negative {
            literal.push('-');
        }
        literal.push_str(&int_digits);
        if frac_range.is_some() {
            literal.push('.');
            literal.push_str(&frac_digits);
        }
        if let Some(exp) = exp_digits {
            literal.push('e');
            literal.push_str(&exp);
        }
        literal.parse::<f64>().ok().map(Number::Real)
    }

    /// Digits in `range` with separators removed and `#` read as `0`.
    fn digits(&self, (from, to): (usize, usize)) -> String {
        self.text[from..to]
            .chars()
            .filter(|&c| c != '_')
            .map(|c| if c == '#' { '0' } else { c })
            .collect()
    }

    /// Every `_` must sit between two digits.
    fn underscores_valid(&self, token: &str) -> bool {
        let bytes = token.as_bytes();
        bytes
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c == b'_')
            .all(|(i, _)| {
                i > 0
                    && i + 1 < bytes.len()
                    && self.is_digit(bytes[i - 1])
                    && self.is_digit(bytes[i + 1])
            })
    }
}

/// Exact value of a decimal literal: `(int + frac / 10^len) · 10^exp`.
fn exact_decimal(negative: bool, int: &str, frac: &str, exp: Option<&str>) -> Option<Number> {
    let ten = BigInt::from(10);
    let parse = |digits: &str| -> Option<BigInt> {
        if digits.is_empty() {
            Some(BigInt::default())
        } else {
            BigInt::parse_bytes(digits.as_bytes(), 10)
        }
    };

    let scale = ten.pow(u32::try_from(frac.len()).ok()?);
    let mut numer = parse(int)? * &scale + parse(frac)?;
    let mut denom = scale;
    if let Some(exp) = exp {
        let e: i64 = exp.parse().ok()?;
        let power = ten.pow(u32::try_from(e.unsigned_abs()).ok()?);
        if e >= 0 {
            numer *= power;
        } else {
            denom *= power;
        }
    }
    if negative {
        numer = -numer;
    }
    Some(Ratio::reduce(numer, denom))
}
