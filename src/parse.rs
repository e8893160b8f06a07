//! Lenient numeric conversion for the set entry fields.
//!
//! Both helpers read the longest numeric prefix of the input and ignore
//! whatever follows it, so "80kg" is 80 and "5 reps" is 5. Input without any
//! leading digits yields `f32::NAN`, which is stored as-is.

/// Parse a decimal weight such as `"62.5"`, `"1e2"` or `" -3"`.
pub fn parse_float(input: &str) -> f32 {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    if s[end..].starts_with("Infinity") {
        return if s.starts_with('-') {
            f32::NEG_INFINITY
        } else {
            f32::INFINITY
        };
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return f32::NAN;
    }

    // Only consume an exponent that actually carries digits.
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

    s[..end].parse().unwrap_or(f32::NAN)
}

/// Parse a whole number of reps. Any fractional part is dropped.
pub fn parse_int(input: &str) -> f32 {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let sign = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let digits = count_digits(&bytes[sign..]);
    if digits == 0 {
        return f32::NAN;
    }
    let value: f32 = s[sign..sign + digits].parse().unwrap_or(f32::NAN);
    if bytes[0] == b'-' { -value } else { value }
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_accepts_fractional_weights() {
        assert_eq!(parse_float("62.5"), 62.5);
        assert_eq!(parse_float(".5"), 0.5);
        assert_eq!(parse_float("80."), 80.0);
        assert_eq!(parse_float("  -2.5"), -2.5);
        assert_eq!(parse_float("1e2"), 100.0);
    }

    #[test]
    fn float_stops_at_trailing_garbage() {
        assert_eq!(parse_float("80kg"), 80.0);
        assert_eq!(parse_float("1e"), 1.0);
        assert_eq!(parse_float("2e+x"), 2.0);
        assert_eq!(parse_float("3.5.1"), 3.5);
    }

    #[test]
    fn float_without_digits_is_nan() {
        assert!(parse_float("abc").is_nan());
        assert!(parse_float(".").is_nan());
        assert!(parse_float("-").is_nan());
        assert!(parse_float("").is_nan());
    }

    #[test]
    fn float_reads_infinity() {
        assert_eq!(parse_float("Infinity"), f32::INFINITY);
        assert_eq!(parse_float("-Infinity"), f32::NEG_INFINITY);
    }

    #[test]
    fn int_truncates() {
        assert_eq!(parse_int("5"), 5.0);
        assert_eq!(parse_int("5.9"), 5.0);
        assert_eq!(parse_int(" 12 reps"), 12.0);
        assert_eq!(parse_int("-3"), -3.0);
        assert!(parse_int("x5").is_nan());
        assert!(parse_int("-").is_nan());
    }
}
