//! Number literal parsing: integer accumulation with overflow checks, and a
//! float path with an Eisel-Lemire-style fast path falling back to an
//! exact conversion.

/// The outcome of parsing a JSON number literal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Number {
    Int(i64),
    UInt(u64),
    Float(f64),
}

/// Parses the integer grammar: `-?(0|[1-9][0-9]*)` with no
/// fraction/exponent. `bytes` is exactly the number's byte span as scanned
/// by the parser (already known to match that grammar).
///
/// Returns `None` when the magnitude falls outside `[-2^63, 2^64)`
/// (`NumberOutOfRange`).
pub(crate) fn parse_integer(bytes: &[u8]) -> Option<Number> {
    let (negative, digits) = match bytes.split_first() {
        Some((b'-', rest)) => (true, rest),
        _ => (false, bytes),
    };

    // u64::MAX has 20 decimal digits; any longer run cannot fit regardless
    // of value, so reject before accumulating to keep the u128 below from
    // ever wrapping.
    if digits.len() > 20 {
        return None;
    }

    // Accumulate in u128 so we can detect overflow against u64::MAX before
    // narrowing, rather than wrapping during accumulation.
    let mut acc: u128 = 0;
    for &b in digits {
        acc = acc * 10 + u128::from(b - b'0');
        if acc > u128::from(u64::MAX) {
            return None;
        }
    }

    if negative {
        let v = -(acc as i128);
        if v >= i128::from(i64::MIN) {
            Some(Number::Int(v as i64))
        } else {
            None
        }
    } else if acc <= u128::from(i64::MAX as u64) {
        #[expect(clippy::cast_possible_truncation, reason = "bounds checked above")]
        Some(Number::Int(acc as i64))
    } else {
        #[expect(clippy::cast_possible_truncation, reason = "bounds checked above")]
        Some(Number::UInt(acc as u64))
    }
}

/// Powers of ten representable exactly as `f64`, used by the Clinger fast
/// path below (`10.0_f64.powi(n)` is only exact for `n` in this range).
const POW10: [f64; 23] = [
    1e0, 1e1, 1e2, 1e3, 1e4, 1e5, 1e6, 1e7, 1e8, 1e9, 1e10, 1e11, 1e12, 1e13, 1e14, 1e15, 1e16,
    1e17, 1e18, 1e19, 1e20, 1e21, 1e22,
];

/// Parses the float grammar: the full literal (sign, integer part,
/// optional fraction, optional exponent) as scanned by the parser.
///
/// Tries Clinger's fast path first (exact when the significand fits in 53
/// bits and the scaling power of ten is exactly representable); otherwise
/// falls back to the standard library's correctly-rounded decimal-to-binary
/// conversion, which is itself Eisel-Lemire-based in current Rust. Either
/// way the result is the nearest `binary64` to the literal.
///
/// Returns `None` if the literal overflows to +/-infinity
/// (`NumberOutOfRange`).
pub(crate) fn parse_float(bytes: &[u8]) -> Option<Number> {
    if let Some(fast) = fast_path(bytes) {
        return finite_or_none(fast);
    }
    // `bytes` is pure ASCII (it was scanned against the JSON number
    // grammar), so this is always valid UTF-8.
    let text = core::str::from_utf8(bytes).expect("number literal is ASCII");
    let v: f64 = text.parse().ok()?;
    finite_or_none(v)
}

fn finite_or_none(v: f64) -> Option<Number> {
    if v.is_finite() {
        Some(Number::Float(v))
    } else {
        None
    }
}

/// Clinger's fast path (as used by, e.g., `strtod` fast paths generally,
/// and the "fast path" half of Eisel-Lemire): if the decimal value can be
/// written exactly as `mantissa * 10^exponent` with `mantissa` in `[0,
/// 2^53]` and `exponent` in `[-22, 22]`, then `mantissa as f64 *
/// 10f64.powi(exponent)` (or dividing for negative exponent) is the
/// correctly rounded result, because both operands are exactly
/// representable and a single IEEE-754 multiply/divide is correctly
/// rounded.
///
/// Returns `None` when the literal doesn't meet those conditions (too many
/// significant digits, or exponent out of range); the caller then takes the
/// always-correct slow path.
fn fast_path(bytes: &[u8]) -> Option<f64> {
    let (negative, rest) = match bytes.split_first() {
        Some((b'-', rest)) => (true, rest),
        _ => (false, bytes),
    };

    let mut mantissa: u64 = 0;
    let mut digit_count = 0u32;
    let mut exponent: i32 = 0;
    let mut seen_dot = false;
    let mut i = 0;
    let mut saw_exp = false;

    while i < rest.len() {
        match rest[i] {
            b'.' if !seen_dot => {
                seen_dot = true;
                i += 1;
            }
            b'e' | b'E' => {
                saw_exp = true;
                i += 1;
                break;
            }
            d @ b'0'..=b'9' => {
                digit_count += 1;
                if digit_count > 19 {
                    // Too many significant digits to fit a u64 mantissa
                    // exactly; let the slow path handle it.
                    return None;
                }
                mantissa = mantissa * 10 + u64::from(d - b'0');
                if seen_dot {
                    exponent -= 1;
                }
                i += 1;
            }
            _ => return None,
        }
    }

    if saw_exp {
        let exp_bytes = &rest[i..];
        let (exp_negative, exp_digits) = match exp_bytes.split_first() {
            Some((b'+', r)) => (false, r),
            Some((b'-', r)) => (true, r),
            _ => (false, exp_bytes),
        };
        if exp_digits.is_empty() || exp_digits.len() > 4 {
            return None;
        }
        let mut e: i32 = 0;
        for &d in exp_digits {
            if !d.is_ascii_digit() {
                return None;
            }
            e = e * 10 + i32::from(d - b'0');
        }
        exponent += if exp_negative { -e } else { e };
    }

    if mantissa > (1u64 << 53) || !(-22..=22).contains(&exponent) {
        return None;
    }

    #[expect(
        clippy::cast_precision_loss,
        reason = "mantissa fits in 53 bits, exactly representable as f64"
    )]
    let mut value = mantissa as f64;
    if exponent >= 0 {
        value *= POW10[exponent as usize];
    } else {
        #[expect(clippy::cast_sign_loss, reason = "exponent is known negative here")]
        let idx = (-exponent) as usize;
        if idx >= POW10.len() {
            return None;
        }
        value /= POW10[idx];
    }

    Some(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::{parse_float, parse_integer, Number};

    #[test]
    fn parses_small_integers() {
        assert_eq!(parse_integer(b"0"), Some(Number::Int(0)));
        assert_eq!(parse_integer(b"1596728892"), Some(Number::Int(1_596_728_892)));
        assert_eq!(parse_integer(b"-42"), Some(Number::Int(-42)));
    }

    #[test]
    fn parses_i64_boundaries() {
        assert_eq!(parse_integer(b"9223372036854775807"), Some(Number::Int(i64::MAX)));
        assert_eq!(parse_integer(b"-9223372036854775808"), Some(Number::Int(i64::MIN)));
    }

    #[test]
    fn promotes_to_uint_above_i64_max() {
        assert_eq!(
            parse_integer(b"9223372036854775808"),
            Some(Number::UInt(9_223_372_036_854_775_808))
        );
        assert_eq!(parse_integer(b"18446744073709551615"), Some(Number::UInt(u64::MAX)));
    }

    #[test]
    fn rejects_out_of_range_integers() {
        assert_eq!(parse_integer(b"18446744073709551616"), None);
        assert_eq!(parse_integer(b"-9223372036854775809"), None);
    }

    #[test]
    fn float_spot_checks_round_trip() {
        for text in [
            "31.245270191439438",
            "100.78399658203125",
            "3.141592653589793",
            "3.4028235e38",
        ] {
            let Number::Float(v) = parse_float(text.as_bytes()).unwrap() else {
                panic!("expected float");
            };
            assert_eq!(v, text.parse::<f64>().unwrap());
        }
    }

    #[test]
    fn float_overflow_to_infinity_is_rejected() {
        assert_eq!(parse_float(b"1e400"), None);
    }

    #[test]
    fn fast_path_and_slow_path_agree() {
        // 20 significant digits forces the slow path.
        let text = "12345678901234567890.5";
        let Number::Float(v) = parse_float(text.as_bytes()).unwrap() else {
            panic!("expected float");
        };
        assert_eq!(v, text.parse::<f64>().unwrap());
    }
}
