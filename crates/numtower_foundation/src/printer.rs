//! Number printer: canonical values to literal text.
//!
//! Exact numbers print in radix 2, 8, 10 or 16. Inexact reals print only in
//! radix 10, with the configured number of significant digits, and always
//! contain a `.` or an exponent so they never read back as exact integers.

use std::fmt;

use crate::config::{self, NumberConfig};
use crate::error::{Error, Result};
use crate::number::{Number, Ratio};

/// Radixes accepted by the printer and the reader.
pub const RADIXES: [u32; 4] = [2, 8, 10, 16];

/// Validates a radix argument.
pub(crate) fn check_radix(radix: i64) -> Result<u32> {
    u32::try_from(radix)
        .ok()
        .filter(|r| RADIXES.contains(r))
        .ok_or_else(|| Error::incorrect_radix(radix, "2, 8, 10 or 16"))
}

/// `(number->string n radix)` with the process-wide configuration.
///
/// # Errors
///
/// Returns `IncorrectRadix` for a radix other than 2, 8, 10 or 16, or for
/// an inexact number in a radix other than 10.
pub fn number_to_string(n: &Number, radix: i64) -> Result<String> {
    number_to_string_with(n, radix, &config::current())
}

/// `(number->string n radix)` with an explicit configuration.
///
/// # Errors
///
/// See [`number_to_string`].
pub fn number_to_string_with(n: &Number, radix: i64, config: &NumberConfig) -> Result<String> {
    let radix = check_radix(radix).map_err(|e| e.in_primitive("number->string"))?;
    let mut out = String::new();
    render(n, radix, config.real_precision, &mut out)
        .map_err(|e| e.in_primitive("number->string"))?;
    Ok(out)
}

fn render(n: &Number, radix: u32, precision: u8, out: &mut String) -> Result<()> {
    match n {
        Number::Fixnum(i) => push_fixnum(*i, radix, out),
        Number::Bignum(b) => out.push_str(&b.to_str_radix(radix)),
        Number::Rational(r) => {
            out.push_str(&r.numer().to_str_radix(radix));
            out.push('/');
            out.push_str(&r.denom().to_str_radix(radix));
        }
        Number::Real(d) => {
            if radix != 10 {
                return Err(Error::incorrect_radix(
                    i64::from(radix),
                    "10 for inexact numbers",
                ));
            }
            out.push_str(&format_real(*d, precision));
        }
        Number::Complex(c) => {
            render(c.re(), radix, precision, out)?;
            let mut imag = String::new();
            render(c.im(), radix, precision, &mut imag)?;
            if !imag.starts_with(['-', '+']) {
                out.push('+');
            }
            out.push_str(&imag);
            out.push('i');
        }
    }
    Ok(())
}

fn push_fixnum(i: i64, radix: u32, out: &mut String) {
    if i < 0 {
        out.push('-');
    }
    let magnitude = i.unsigned_abs();
    out.push_str(&match radix {
        2 => format!("{magnitude:b}"),
        8 => format!("{magnitude:o}"),
        16 => format!("{magnitude:x}"),
        _ => magnitude.to_string(),
    });
}

// =============================================================================
// Reals
// =============================================================================

/// Formats a double with `precision` significant digits, the way C's `%g`
/// does, then canonicalizes the result to Scheme syntax.
#[must_use]
pub fn format_real(d: f64, precision: u8) -> String {
    if d.is_nan() {
        return if d.is_sign_negative() { "-nan.0" } else { "+nan.0" }.to_string();
    }
    if d.is_infinite() {
        return if d < 0.0 { "-inf.0" } else { "+inf.0" }.to_string();
    }

    let digits = usize::from(precision.max(1));
    let scientific = format!("{:.*e}", digits - 1, d);
    let (mantissa, exponent) = scientific
        .split_once('e')
        .and_then(|(m, e)| e.parse::<i64>().ok().map(|e| (m, e)))
        .unwrap_or((scientific.as_str(), 0));

    #[allow(clippy::cast_possible_wrap)]
    let fixed = (-4..digits as i64).contains(&exponent);
    let mut text = if fixed {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let decimals = (digits as i64 - 1 - exponent) as usize;
        strip_zeros(&format!("{d:.decimals$}")).to_string()
    } else {
        format!(
            "{}e{}{:02}",
            strip_zeros(mantissa),
            if exponent < 0 { '-' } else { '+' },
            exponent.unsigned_abs()
        )
    };
    if !text.contains(['.', 'e']) {
        text.push_str(".0");
    }
    text
}

/// Drops trailing fractional zeros and a dangling `.`.
fn strip_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

// =============================================================================
// Display
// =============================================================================

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        render(self, 10, config::current().real_precision, &mut out).map_err(|_| fmt::Error)?;
        f.write_str(&out)
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numer(), self.denom())
    }
}
