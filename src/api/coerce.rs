// Permissive numeric coercion
//
// Query operands never fail: the longest leading decimal number is used and
// anything unparseable, NaN or zero becomes 0.

use serde::Serializer;

/// Largest integer an f64 holds exactly (2^53 - 1)
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Parse a query operand, substituting 0 for anything that is not a number
///
/// Accepts leading whitespace, an optional sign, digits with an optional
/// fraction and exponent, or the literal `Infinity`. Trailing garbage is
/// ignored, so `"5abc"` is 5 while `"abc5"` is 0.
pub fn parse_numeric_or_zero(raw: Option<&str>) -> f64 {
    let value = raw.and_then(leading_number).unwrap_or(0.0);
    // NaN and -0 both collapse to a plain 0
    if value.is_nan() || value == 0.0 {
        0.0
    } else {
        value
    }
}

fn leading_number(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    if s[end..].starts_with("Infinity") {
        return s[..end + "Infinity".len()].parse().ok();
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if int_digits + frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end].parse().ok()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Serialize integral values as JSON integers (`5` rather than `5.0`)
///
/// Non-finite values go through `serialize_f64`, which serde_json writes as
/// `null`.
#[allow(clippy::trivially_copy_pass_by_ref)]
pub fn serialize_number<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_finite() && value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
        #[allow(clippy::cast_possible_truncation)]
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_numbers() {
        assert_eq!(parse_numeric_or_zero(Some("5")), 5.0);
        assert_eq!(parse_numeric_or_zero(Some("-2.5")), -2.5);
        assert_eq!(parse_numeric_or_zero(Some("+7")), 7.0);
        assert_eq!(parse_numeric_or_zero(Some(".5")), 0.5);
        assert_eq!(parse_numeric_or_zero(Some("1e3")), 1000.0);
        assert_eq!(parse_numeric_or_zero(Some("2.5E-1")), 0.25);
    }

    #[test]
    fn test_missing_or_garbage_is_zero() {
        assert_eq!(parse_numeric_or_zero(None), 0.0);
        assert_eq!(parse_numeric_or_zero(Some("")), 0.0);
        assert_eq!(parse_numeric_or_zero(Some("abc")), 0.0);
        assert_eq!(parse_numeric_or_zero(Some("-")), 0.0);
        assert_eq!(parse_numeric_or_zero(Some(".")), 0.0);
        assert_eq!(parse_numeric_or_zero(Some("NaN")), 0.0);
        assert_eq!(parse_numeric_or_zero(Some("inf")), 0.0);
    }

    #[test]
    fn test_leading_prefix_is_used() {
        assert_eq!(parse_numeric_or_zero(Some("5abc")), 5.0);
        assert_eq!(parse_numeric_or_zero(Some("  42  ")), 42.0);
        assert_eq!(parse_numeric_or_zero(Some("3.25.15")), 3.25);
        assert_eq!(parse_numeric_or_zero(Some("5.")), 5.0);
        assert_eq!(parse_numeric_or_zero(Some("2e")), 2.0);
        assert_eq!(parse_numeric_or_zero(Some("2e+")), 2.0);
        assert_eq!(parse_numeric_or_zero(Some("1,000")), 1.0);
    }

    #[test]
    fn test_negative_zero_is_zero() {
        let value = parse_numeric_or_zero(Some("-0"));
        assert_eq!(value, 0.0);
        assert!(value.is_sign_positive());
    }

    #[test]
    fn test_infinity() {
        assert_eq!(parse_numeric_or_zero(Some("Infinity")), f64::INFINITY);
        assert_eq!(parse_numeric_or_zero(Some("-Infinityx")), f64::NEG_INFINITY);
        assert_eq!(parse_numeric_or_zero(Some("1e999")), f64::INFINITY);
    }

    #[derive(serde::Serialize)]
    struct Wrapper(#[serde(serialize_with = "serialize_number")] f64);

    fn render(value: f64) -> String {
        serde_json::to_string(&Wrapper(value)).unwrap()
    }

    #[test]
    fn test_serialize_number() {
        assert_eq!(render(5.0), "5");
        assert_eq!(render(-3.0), "-3");
        assert_eq!(render(0.0), "0");
        assert_eq!(render(2.5), "2.5");
        assert_eq!(render(1e300), "1e+300");
        assert_eq!(render(f64::INFINITY), "null");
    }
}
