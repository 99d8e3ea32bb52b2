//! # Measurement Parsing
//!
//! Coerces user-entered carton measurements and counts to numbers.
//!
//! Parsing reads the longest leading decimal literal, so `"12in"` is 12 and
//! `"  7.5 lbs"` is 7.5. Missing, empty, unparseable, and NaN input all
//! become `0.0`. Infinities survive: `"1e999"` and `"Infinity"` parse to
//! `f64::INFINITY` and classify as oversize or overweight.
//!
//! Treating absent input as zero means "not entered" and "entered as 0" are
//! indistinguishable downstream. The conveyability classifier relies on this
//! for its zero-weight rule; see [`crate::conveyability`].

/// Parse a measurement, returning `0.0` for anything that is not a number.
pub fn parse_measure(input: Option<&str>) -> f64 {
    let Some(raw) = input else {
        return 0.0;
    };
    let s = raw.trim_start();
    let end = numeric_prefix_len(s.as_bytes());
    match s[..end].parse::<f64>() {
        Ok(v) => coerce(v),
        Err(_) => 0.0,
    }
}

/// Map NaN to `0.0`. Infinities are kept.
pub fn coerce(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value
    }
}

/// Parse a count, reading the leading `[+-]digits` prefix. Fractions are
/// dropped (`"12.7"` is 12); anything without digits is `0`. Values past the
/// `i64` range saturate.
pub fn parse_count(input: Option<&str>) -> i64 {
    let Some(raw) = input else {
        return 0;
    };
    let s = raw.trim_start();
    let b = s.as_bytes();
    let sign_len = usize::from(matches!(b.first(), Some(b'+' | b'-')));
    let digits = b[sign_len..]
        .iter()
        .take_while(|c| c.is_ascii_digit())
        .count();
    if digits == 0 {
        return 0;
    }
    let literal = &s[..sign_len + digits];
    literal.parse::<i64>().unwrap_or(if b[0] == b'-' {
        i64::MIN
    } else {
        i64::MAX
    })
}

const INFINITY_LITERAL: &[u8] = b"Infinity";

/// Length of the leading `[+-]Infinity` or `[+-]digits[.digits][e[+-]digits]`
/// literal.
fn numeric_prefix_len(b: &[u8]) -> usize {
    let mut i = 0;
    if matches!(b.first(), Some(b'+' | b'-')) {
        i += 1;
    }
    if b[i..].starts_with(INFINITY_LITERAL) {
        return i + INFINITY_LITERAL.len();
    }
    let int_start = i;
    while b.get(i).is_some_and(u8::is_ascii_digit) {
        i += 1;
    }
    let mut digits = i - int_start;
    if b.get(i) == Some(&b'.') {
        let frac_start = i + 1;
        let mut j = frac_start;
        while b.get(j).is_some_and(u8::is_ascii_digit) {
            j += 1;
        }
        digits += j - frac_start;
        if digits > 0 {
            i = j;
        }
    }
    if digits == 0 {
        return 0;
    }
    if matches!(b.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(b.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exp_start = j;
        while b.get(j).is_some_and(u8::is_ascii_digit) {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }
    i
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_numbers() {
        assert_eq!(parse_measure(Some("24")), 24.0);
        assert_eq!(parse_measure(Some("12.5")), 12.5);
        assert_eq!(parse_measure(Some(".5")), 0.5);
        assert_eq!(parse_measure(Some("5.")), 5.0);
        assert_eq!(parse_measure(Some("-3")), -3.0);
        assert_eq!(parse_measure(Some("1e2")), 100.0);
    }

    #[test]
    fn leading_prefix_with_trailing_text() {
        assert_eq!(parse_measure(Some("12in")), 12.0);
        assert_eq!(parse_measure(Some("  7.5 lbs")), 7.5);
        assert_eq!(parse_measure(Some("3e")), 3.0);
        assert_eq!(parse_measure(Some("4.2.1")), 4.2);
    }

    #[test]
    fn missing_or_garbage_is_zero() {
        assert_eq!(parse_measure(None), 0.0);
        assert_eq!(parse_measure(Some("")), 0.0);
        assert_eq!(parse_measure(Some("   ")), 0.0);
        assert_eq!(parse_measure(Some("abc")), 0.0);
        assert_eq!(parse_measure(Some("-")), 0.0);
        assert_eq!(parse_measure(Some(".")), 0.0);
    }

    #[test]
    fn nan_is_zero() {
        assert_eq!(coerce(f64::NAN), 0.0);
        assert_eq!(coerce(2.5), 2.5);
        assert_eq!(parse_measure(Some("NaN")), 0.0);
    }

    #[test]
    fn infinities_are_kept() {
        assert_eq!(parse_measure(Some("1e999")), f64::INFINITY);
        assert_eq!(parse_measure(Some("Infinity")), f64::INFINITY);
        assert_eq!(parse_measure(Some("+Infinity in")), f64::INFINITY);
        assert_eq!(parse_measure(Some("-Infinity")), f64::NEG_INFINITY);
        assert_eq!(coerce(f64::NEG_INFINITY), f64::NEG_INFINITY);
    }

    #[test]
    fn infinity_literal_is_case_sensitive() {
        assert_eq!(parse_measure(Some("infinity")), 0.0);
        assert_eq!(parse_measure(Some("inf")), 0.0);
        assert_eq!(parse_measure(Some("Infin")), 0.0);
    }

    #[test]
    fn counts_read_the_integer_prefix() {
        assert_eq!(parse_count(Some("12")), 12);
        assert_eq!(parse_count(Some(" 12.7 cartons")), 12);
        assert_eq!(parse_count(Some("-3")), -3);
        assert_eq!(parse_count(Some("+4")), 4);
        assert_eq!(parse_count(Some("abc")), 0);
        assert_eq!(parse_count(Some(".5")), 0);
        assert_eq!(parse_count(Some("-")), 0);
        assert_eq!(parse_count(None), 0);
    }

    #[test]
    fn oversized_counts_saturate() {
        assert_eq!(parse_count(Some("99999999999999999999")), i64::MAX);
        assert_eq!(parse_count(Some("-99999999999999999999")), i64::MIN);
    }
}
