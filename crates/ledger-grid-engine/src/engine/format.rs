/// Number of fractional digits kept when rendering non-integer results.
const MAX_FRACTION_DIGITS: usize = 10;

/// Format a number for display without grouping.
///
/// Integers render without a fractional part; other values keep up to ten
/// fractional digits with trailing zeros trimmed, which hides binary noise
/// such as `0.1 + 0.2 = 0.30000000000000004`.
pub fn format_number(n: f64) -> String {
    if n.is_nan() || n.is_infinite() {
        return "#ERROR".to_string();
    }
    if n.fract() == 0.0 && n.abs() < 1e15 {
        return format!("{:.0}", n);
    }
    let fixed = format!("{:.*}", MAX_FRACTION_DIGITS, n);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::format_number;

    #[test]
    fn test_integers_have_no_fraction() {
        assert_eq!(format_number(14.0), "14");
        assert_eq!(format_number(-3.0), "-3");
        assert_eq!(format_number(0.0), "0");
    }

    #[test]
    fn test_fractions_are_trimmed() {
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(0.1 + 0.2), "0.3");
        assert_eq!(format_number(-1e-12), "0");
    }

    #[test]
    fn test_non_finite_is_error_token() {
        assert_eq!(format_number(f64::NAN), "#ERROR");
        assert_eq!(format_number(f64::INFINITY), "#ERROR");
    }
}
