//! Number formatting: shortest-decimal integers via `itoa`, shortest
//! round-trip floats via `ryu`.

/// Strict-integer bound: `+/-(2^53 - 1)`, the largest magnitude an
/// `f64`-backed host number type can represent exactly.
const STRICT_INTEGER_MAX: i128 = (1i128 << 53) - 1;

pub(crate) fn write_int(out: &mut Vec<u8>, v: i64) {
    let mut buf = itoa::Buffer::new();
    out.extend_from_slice(buf.format(v).as_bytes());
}

pub(crate) fn write_uint(out: &mut Vec<u8>, v: u64) {
    let mut buf = itoa::Buffer::new();
    out.extend_from_slice(buf.format(v).as_bytes());
}

/// Writes a `binary64`: non-finite values fold to the JSON literal
/// `null`; finite values use `ryu`'s shortest round-trip
/// representation, which already includes a trailing `.0` for integral
/// values and preserves the sign of `-0.0`.
pub(crate) fn write_float(out: &mut Vec<u8>, v: f64) {
    if !v.is_finite() {
        out.extend_from_slice(b"null");
        return;
    }
    let mut buf = ryu::Buffer::new();
    out.extend_from_slice(buf.format_finite(v).as_bytes());
}

/// Returns `true` if `v` is within `+/-(2^53 - 1)`, i.e. legal to emit under
/// `STRICT_INTEGER`.
pub(crate) fn fits_strict_integer(v: i128) -> bool {
    (-STRICT_INTEGER_MAX..=STRICT_INTEGER_MAX).contains(&v)
}

#[cfg(test)]
mod tests {
    use super::{fits_strict_integer, write_float, write_int, write_uint};

    fn float_to_string(v: f64) -> String {
        let mut out = Vec::new();
        write_float(&mut out, v);
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn integers_use_shortest_decimal() {
        let mut out = Vec::new();
        write_int(&mut out, 1_596_728_892);
        assert_eq!(out, b"1596728892");

        let mut out = Vec::new();
        write_uint(&mut out, u64::MAX);
        assert_eq!(out, b"18446744073709551615");
    }

    #[test]
    fn float_literal_spot_checks() {
        assert_eq!(float_to_string(31.245_270_191_439_438), "31.245270191439438");
        assert_eq!(float_to_string(100.783_996_582_031_25), "100.78399658203125");
        assert_eq!(float_to_string(core::f64::consts::PI), "3.141592653589793");
        assert_eq!(float_to_string(3.4028235e38), "3.4028235e38");
    }

    #[test]
    fn non_finite_folds_to_null() {
        assert_eq!(float_to_string(f64::NAN), "null");
        assert_eq!(float_to_string(f64::INFINITY), "null");
        assert_eq!(float_to_string(f64::NEG_INFINITY), "null");
    }

    #[test]
    fn negative_zero_is_preserved() {
        assert_eq!(float_to_string(-0.0), "-0.0");
    }

    #[test]
    fn integral_float_gets_trailing_point_zero() {
        assert_eq!(float_to_string(1.0), "1.0");
    }

    #[test]
    fn strict_integer_bounds() {
        assert!(fits_strict_integer(9_007_199_254_740_991));
        assert!(!fits_strict_integer(9_007_199_254_740_992));
        assert!(fits_strict_integer(-9_007_199_254_740_991));
        assert!(!fits_strict_integer(-9_007_199_254_740_992));
    }
}
